/// External (serializable) representations of the entities exchanged with files and the nesting service.
pub mod ext_repr;

/// All logic for converting external representations into internal ones
pub mod import;

/// All logic for exporting internal representations into external ones
pub mod export;

/// All logic for drawing placements and the editor canvas as SVG
pub mod svg;
