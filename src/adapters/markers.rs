use crate::domain::model::Coordinate;
use crate::domain::ports::MarkerSurface;

/// In-memory marker surface. Keeps every placed marker and, like a map that
/// re-centers on each new pin, the last one as its center.
#[derive(Debug, Clone, Default)]
pub struct MarkerCollector {
    markers: Vec<Coordinate>,
    center: Option<Coordinate>,
}

impl MarkerCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Coordinate] {
        &self.markers
    }

    pub fn center(&self) -> Option<Coordinate> {
        self.center
    }
}

impl MarkerSurface for MarkerCollector {
    fn place_markers(&mut self, coordinates: &[Coordinate]) {
        tracing::debug!("Placing {} markers", coordinates.len());
        self.markers.extend_from_slice(coordinates);
        if let Some(last) = coordinates.last() {
            self.center = Some(*last);
        }
    }
}
