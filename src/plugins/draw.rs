use crate::{
    core::{config::DisplayConfig, geo::LatLng, geo::LatLngDelta},
    input::events::{EventHandled, InputEvent, KeyCode, MouseButton},
    plugins::{base::PluginTrait, measure::AreaLabel},
    prelude::HashMap,
    transform::{AreaPreservingTransform, DragState, DragStep, Polygon, PolygonId},
    Error, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawState {
    Idle,
    Drawing { points: Vec<LatLng> },
}

/// Draw-then-drag session over a set of area-preserving polygons.
///
/// Clicks add vertices while drawing mode is on; a context-menu click closes
/// the ring once it has three vertices. Outside drawing mode, pressing on a
/// polygon grabs it and every pointer move drags it by the distance moved
/// since the previous event.
pub struct DrawPlugin {
    transform: AreaPreservingTransform,
    config: DisplayConfig,
    state: DrawState,
    drag: DragState,
    polygons: HashMap<PolygonId, Polygon>,
    /// Draw order; later polygons sit on top for hit testing
    order: Vec<PolygonId>,
    last_notice: Option<String>,
}

impl DrawPlugin {
    pub fn new() -> Self {
        Self::with_config(AreaPreservingTransform::default(), DisplayConfig::default())
    }

    pub fn with_config(transform: AreaPreservingTransform, config: DisplayConfig) -> Self {
        Self {
            transform,
            config,
            state: DrawState::Idle,
            drag: DragState::Idle,
            polygons: HashMap::default(),
            order: Vec::new(),
            last_notice: None,
        }
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Drawing-mode button: turns drawing on, or cancels the open gesture
    pub fn toggle_drawing(&mut self) {
        if self.is_drawing() {
            self.cancel_drawing();
        } else {
            self.drag = DragState::Idle;
            self.state = DrawState::Drawing { points: Vec::new() };
        }
    }

    /// Cancel drawing
    pub fn cancel_drawing(&mut self) {
        self.state = DrawState::Idle;
    }

    /// Vertices of the gesture in progress, for the preview outline
    pub fn drawing_points(&self) -> &[LatLng] {
        match &self.state {
            DrawState::Drawing { points } => points,
            DrawState::Idle => &[],
        }
    }

    pub fn add_vertex(&mut self, point: LatLng) -> Result<()> {
        let DrawState::Drawing { points } = &mut self.state else {
            return Err(Error::Plugin("not in drawing mode".to_string()));
        };
        if !point.is_valid() {
            return Err(Error::InvalidInput(format!(
                "invalid vertex ({}, {})",
                point.lat, point.lng
            )));
        }
        points.push(point);
        Ok(())
    }

    /// Closes the ring if it has enough vertices.
    ///
    /// Returns `Ok(None)` and keeps drawing when fewer than three vertices
    /// have been placed.
    pub fn finish_drawing(&mut self) -> Result<Option<PolygonId>> {
        let DrawState::Drawing { points } = &self.state else {
            return Ok(None);
        };
        if points.len() < crate::constants::MIN_RING_VERTICES {
            return Ok(None);
        }
        if let Some(max_polygons) = self.config.max_polygons {
            if self.polygons.len() >= max_polygons {
                return Err(Error::Plugin("Maximum number of polygons reached".to_string()));
            }
        }

        let polygon = self.transform.create_from_vertices(points.clone())?;
        let id = polygon.id();
        self.order.push(id);
        self.polygons.insert(id, polygon);
        self.state = DrawState::Idle;
        Ok(Some(id))
    }

    /// Topmost polygon under `point`
    pub fn polygon_at(&self, point: &LatLng) -> Option<PolygonId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.polygons[id].ring().contains(point))
    }

    pub fn start_drag(&mut self, id: PolygonId, position: LatLng) -> Result<()> {
        if !self.polygons.contains_key(&id) {
            return Err(Error::Plugin(format!("unknown polygon {id}")));
        }
        self.drag = DragState::Dragging {
            polygon: id,
            last: position,
        };
        self.last_notice = None;
        Ok(())
    }

    /// Drags the grabbed polygon so it follows the pointer to `position`.
    ///
    /// On failure the polygon and the drag anchor stay where they were, and
    /// the error is kept as a notice for the host to show.
    pub fn drag_to(&mut self, position: LatLng) -> Result<Option<DragStep>> {
        let DragState::Dragging { polygon: id, last } = self.drag else {
            return Ok(None);
        };
        let polygon = self
            .polygons
            .get_mut(&id)
            .ok_or_else(|| Error::Plugin(format!("unknown polygon {id}")))?;

        let delta = LatLngDelta::between(&last, &position);
        match self.transform.commit_drag(polygon, delta) {
            Ok(step) => {
                self.drag = DragState::Dragging {
                    polygon: id,
                    last: position,
                };
                self.last_notice = None;
                Ok(Some(step))
            }
            Err(err) => {
                self.last_notice = Some(format!("Cannot preserve area: {err}"));
                Err(err)
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Remove a polygon
    pub fn remove_polygon(&mut self, id: PolygonId) -> Result<Polygon> {
        let polygon = self
            .polygons
            .remove(&id)
            .ok_or_else(|| Error::Plugin(format!("unknown polygon {id}")))?;
        self.order.retain(|other| *other != id);
        if matches!(self.drag, DragState::Dragging { polygon, .. } if polygon == id) {
            self.drag = DragState::Idle;
        }
        Ok(polygon)
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(&id)
    }

    /// Polygons in draw order
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> + '_ {
        self.order.iter().map(|id| &self.polygons[id])
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn label(&self, id: PolygonId) -> Option<AreaLabel> {
        self.polygons.get(&id).map(|polygon| {
            AreaLabel::new(
                polygon.original_area(),
                self.config.unit_system,
                self.config.precision,
            )
        })
    }

    /// Set after a failed drag step, cleared by the next successful one
    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    /// One-line hint for the control panel
    pub fn status(&self) -> String {
        if self.is_drawing() {
            "Click to add points, right-click to finish".to_string()
        } else if self.polygons.is_empty() {
            String::new()
        } else {
            format!("{} polygon(s) drawn", self.polygons.len())
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn transform(&self) -> &AreaPreservingTransform {
        &self.transform
    }
}

impl PluginTrait for DrawPlugin {
    fn name(&self) -> &str {
        "Draw"
    }

    fn handle_input(&mut self, input: &InputEvent) -> Result<EventHandled> {
        if input.is_touch_event() {
            return match input.to_pointer() {
                Some(pointer) => self.handle_input(&pointer),
                None => Ok(EventHandled::NotHandled),
            };
        }

        match input {
            InputEvent::Click {
                position,
                button: MouseButton::Left,
            } if self.is_drawing() => {
                self.add_vertex(*position)?;
                Ok(EventHandled::Handled)
            }
            InputEvent::ContextMenu { .. } if self.is_drawing() => {
                self.finish_drawing()?;
                Ok(EventHandled::Handled)
            }
            InputEvent::KeyPress { key: KeyCode::Enter } if self.is_drawing() => {
                self.finish_drawing()?;
                Ok(EventHandled::Handled)
            }
            InputEvent::KeyPress {
                key: KeyCode::Escape,
            } => {
                self.cancel_drawing();
                self.end_drag();
                Ok(EventHandled::Handled)
            }
            InputEvent::PointerDown { position } if !self.is_drawing() => {
                match self.polygon_at(position) {
                    Some(id) => {
                        self.start_drag(id, *position)?;
                        Ok(EventHandled::Handled)
                    }
                    None => Ok(EventHandled::NotHandled),
                }
            }
            InputEvent::PointerMove { position } => match self.drag {
                DragState::Dragging { .. } => {
                    self.drag_to(*position)?;
                    Ok(EventHandled::Handled)
                }
                DragState::Idle => Ok(EventHandled::NotHandled),
            },
            InputEvent::PointerUp { .. } => match self.drag {
                DragState::Dragging { .. } => {
                    self.end_drag();
                    Ok(EventHandled::Handled)
                }
                DragState::Idle => Ok(EventHandled::NotHandled),
            },
            _ => Ok(EventHandled::NotHandled),
        }
    }
}

impl Default for DrawPlugin {
    fn default() -> Self {
        Self::new()
    }
}
