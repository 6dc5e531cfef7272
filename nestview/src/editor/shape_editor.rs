use std::num::NonZeroU32;

use log::{debug, trace};

use crate::editor::{EditorError, History};
use crate::entities::{Container, Piece, Session, Warning};
use crate::geometry::{
    Dimensions, GeometryError, GridSnap, MIN_POLYGON_POINTS, Point, Rect, SPolygon,
    ViewTransform, dimensions, rotate_90_cw,
};

#[derive(Clone, Debug, PartialEq)]
pub enum EditorState {
    /// No polygon in progress
    Idle,
    /// A new polygon is being drawn
    Drawing,
    /// The geometry of an existing piece is being modified
    Editing { target: String },
}

/// Effect of a pointer interaction on the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// The first point of a new polygon was placed
    Started,
    /// A point was appended to the open polygon
    Appended,
    /// An existing point was relocated
    Moved,
    /// The interaction was ignored, the editor is unchanged
    Rejected(Warning),
}

#[derive(Clone, Debug)]
struct Snapshot {
    state: EditorState,
    points: Vec<Point>,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    index: usize,
    recorded: bool,
}

/// Interactive editor turning pointer input on a rendering surface into piece geometry.
///
/// Input arrives in screen coordinates and is mapped to world coordinates through the same
/// [`ViewTransform`] used to draw the container. When a [`GridSnap`] is set, every new or
/// relocated point is snapped before it is stored; existing points are never re-snapped.
/// Points are only accepted inside the drawing area (world coordinates, boundary included).
#[derive(Clone, Debug)]
pub struct ShapeEditor {
    state: EditorState,
    points: Vec<Point>,
    view: ViewTransform,
    area: Rect,
    grid: Option<GridSnap>,
    history: History<Snapshot>,
    drag: Option<Drag>,
}

impl ShapeEditor {
    pub fn new(view: ViewTransform, area: Rect) -> Self {
        ShapeEditor {
            state: EditorState::Idle,
            points: vec![],
            view,
            area,
            grid: None,
            history: History::default(),
            drag: None,
        }
    }

    /// Editor whose drawing area is the container, viewed through `view`.
    pub fn for_container(container: &Container, view: ViewTransform) -> Self {
        ShapeEditor::new(view, container.rect())
    }

    pub fn with_grid(mut self, grid: Option<GridSnap>) -> Self {
        self.grid = grid;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == EditorState::Idle
    }

    /// Points of the polygon in progress, in world coordinates.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Points of the polygon in progress, in screen coordinates.
    pub fn screen_points(&self) -> Vec<Point> {
        self.points.iter().map(|p| self.view.to_screen(*p)).collect()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn area(&self) -> &Rect {
        &self.area
    }

    pub fn grid(&self) -> Option<GridSnap> {
        self.grid
    }

    pub fn set_view(&mut self, view: ViewTransform) {
        self.view = view;
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn set_grid(&mut self, grid: Option<GridSnap>) {
        self.grid = grid;
    }

    /// Maps a screen position to the world point the editor would store for it.
    pub fn to_world(&self, screen: Point) -> Point {
        let world = self.view.to_world(screen);
        match self.grid {
            Some(grid) => grid.snap(world),
            None => world,
        }
    }

    pub fn click(&mut self, screen: Point) -> ClickOutcome {
        let p = self.to_world(screen);
        if !self.area.contains_point(p) {
            debug!("[EDITOR] rejected click outside drawing area at {p:?}");
            return ClickOutcome::Rejected(Warning::PointOutsideDrawingArea(p));
        }
        self.record();
        match self.state {
            EditorState::Idle => {
                self.state = EditorState::Drawing;
                self.points = vec![p];
                ClickOutcome::Started
            }
            EditorState::Drawing | EditorState::Editing { .. } => {
                self.points.push(p);
                ClickOutcome::Appended
            }
        }
    }

    /// Whether [`ShapeEditor::finish`] would accept the current polygon.
    pub fn can_finish(&self) -> bool {
        !self.is_idle() && self.points.len() >= MIN_POLYGON_POINTS
    }

    /// Closes the polygon in progress and stores it in `session`.
    ///
    /// While drawing, a new piece is added with quantity 1, named `id` or, if absent, the
    /// session's next free identifier. While editing, the target piece gets the new geometry
    /// and is renamed to `id` if one is given. Returns the identifier of the stored piece.
    pub fn finish(&mut self, session: &mut Session, id: Option<&str>) -> Result<String, EditorError> {
        self.check_finishable()?;
        let shape = SPolygon::try_new(self.points.clone())?;
        let id = match &self.state {
            EditorState::Drawing => {
                let id = id
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|| session.next_piece_id());
                session.add_piece(Piece::new(id.clone(), shape, NonZeroU32::MIN))?;
                id
            }
            EditorState::Editing { target } => {
                let id = id.map(str::trim).unwrap_or(target.as_str()).to_string();
                if id != *target {
                    session.rename_piece(target, &id)?;
                }
                session.replace_geometry(&id, shape.into_points())?;
                id
            }
            EditorState::Idle => return Err(EditorError::NotDrawing),
        };
        debug!("[EDITOR] finished piece {id} with {} points", self.points.len());
        self.reset();
        Ok(id)
    }

    /// Discards the polygon in progress.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!("[EDITOR] discarded {} points", self.points.len());
        }
        self.reset();
    }

    /// Loads the geometry of `piece` for modification.
    pub fn start_editing(&mut self, piece: &Piece) -> Result<(), EditorError> {
        if !self.is_idle() {
            return Err(EditorError::Busy);
        }
        self.state = EditorState::Editing {
            target: piece.id().to_string(),
        };
        self.points = piece.points().to_vec();
        self.history.clear();
        Ok(())
    }

    /// Index of the point closest to `screen`, if it lies within `tolerance_px` pixels.
    pub fn point_at(&self, screen: Point, tolerance_px: f64) -> Option<usize> {
        self.points
            .iter()
            .map(|p| self.view.to_screen(*p).sq_distance(&screen))
            .enumerate()
            .filter(|(_, d)| *d <= tolerance_px * tolerance_px)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
    }

    pub fn begin_drag(&mut self, index: usize) -> Result<(), EditorError> {
        if index >= self.points.len() {
            return Err(EditorError::NoSuchPoint(index));
        }
        self.drag = Some(Drag {
            index,
            recorded: false,
        });
        Ok(())
    }

    /// Moves the dragged point to `screen`. Positions outside the drawing area are ignored.
    /// A whole drag is undone as a single step.
    pub fn drag_to(&mut self, screen: Point) -> Result<ClickOutcome, EditorError> {
        let Some(drag) = self.drag else {
            return Err(EditorError::NotDragging);
        };
        let p = self.to_world(screen);
        if !self.area.contains_point(p) {
            trace!("[EDITOR] ignored drag outside drawing area at {p:?}");
            return Ok(ClickOutcome::Rejected(Warning::PointOutsideDrawingArea(p)));
        }
        if drag.index >= self.points.len() {
            return Err(EditorError::NoSuchPoint(drag.index));
        }
        if !drag.recorded {
            self.record();
            self.drag = Some(Drag {
                recorded: true,
                ..drag
            });
        }
        self.points[drag.index] = p;
        Ok(ClickOutcome::Moved)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Relocates point `index` to `screen` in one step.
    pub fn move_point(&mut self, index: usize, screen: Point) -> Result<ClickOutcome, EditorError> {
        self.begin_drag(index)?;
        let outcome = self.drag_to(screen);
        self.end_drag();
        outcome
    }

    /// Inserts a point halfway between point `after` and its successor (wrapping around).
    /// Returns the index of the new point.
    pub fn insert_midpoint(&mut self, after: usize) -> Result<usize, EditorError> {
        self.check_editing()?;
        let n = self.points.len();
        if after >= n {
            return Err(EditorError::NoSuchPoint(after));
        }
        let mid = self.points[after].midpoint(&self.points[(after + 1) % n]);
        let mid = match self.grid {
            Some(grid) => grid.snap(mid),
            None => mid,
        };
        self.record();
        self.points.insert(after + 1, mid);
        Ok(after + 1)
    }

    /// Removes point `index`, refusing to go below the minimum polygon size.
    pub fn delete_point(&mut self, index: usize) -> Result<Point, EditorError> {
        self.check_editing()?;
        let n = self.points.len();
        if index >= n {
            return Err(EditorError::NoSuchPoint(index));
        }
        if n <= MIN_POLYGON_POINTS {
            return Err(EditorError::TooFewPoints {
                required: MIN_POLYGON_POINTS,
                actual: n - 1,
            });
        }
        self.record();
        Ok(self.points.remove(index))
    }

    /// Rotates every point 90° clockwise around the vertex average, then snaps to the grid if set.
    pub fn rotate_90(&mut self) -> Result<(), EditorError> {
        if self.is_idle() {
            return Err(EditorError::NotDrawing);
        }
        self.record();
        let grid = self.grid;
        self.points = rotate_90_cw(&self.points)
            .into_iter()
            .map(|p| match grid {
                Some(grid) => grid.snap(p),
                None => p,
            })
            .collect();
        Ok(())
    }

    /// Reverts the last modification. Undoing the first point of a new polygon returns to idle.
    pub fn undo(&mut self) -> Result<(), EditorError> {
        let snapshot = self.history.pop().ok_or(EditorError::NothingToUndo)?;
        self.state = snapshot.state;
        self.points = snapshot.points;
        self.drag = None;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Extents of the polygon in progress.
    pub fn dimensions(&self) -> Result<Dimensions, GeometryError> {
        dimensions(&self.points)
    }

    fn record(&mut self) {
        self.history.record(Snapshot {
            state: self.state.clone(),
            points: self.points.clone(),
        });
    }

    fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.points.clear();
        self.history.clear();
        self.drag = None;
    }

    fn check_finishable(&self) -> Result<(), EditorError> {
        if self.is_idle() {
            return Err(EditorError::NotDrawing);
        }
        match self.points.len() >= MIN_POLYGON_POINTS {
            true => Ok(()),
            false => Err(EditorError::TooFewPoints {
                required: MIN_POLYGON_POINTS,
                actual: self.points.len(),
            }),
        }
    }

    /// Point insertion and deletion shift indices, so they wait for a running drag to end.
    fn check_editing(&self) -> Result<(), EditorError> {
        match (&self.state, self.drag) {
            (EditorState::Editing { .. }, None) => Ok(()),
            (EditorState::Editing { .. }, Some(_)) => Err(EditorError::Busy),
            _ => Err(EditorError::NotEditing),
        }
    }
}
