//! Client-side core of `nestview`: everything needed to author pieces, describe a nesting
//! request and display the placement returned by a remote nesting service.

/// Length units and conversions to the millimeter base
pub mod units;

/// Geometric primitives, polygon utilities and the world ↔ screen transform
pub mod geometry;

/// Pieces, containers, requests, placement results and the session state container
pub mod entities;

/// Interactive point-set editor used to author and modify pieces
pub mod editor;

/// Wire formats, file import/export and SVG rendering of placements
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
