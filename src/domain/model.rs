use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Stand-in location for places the provider returns without geometry.
    pub const ORIGIN: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance (haversine).
    pub fn distance_meters(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().min(1.0).asin()
    }

    /// Arithmetic mean of a set of coordinates, `None` when empty.
    pub fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (lat, lng) = points.iter().fold((0.0, 0.0), |(lat, lng), p| {
            (lat + p.latitude, lng + p.longitude)
        });
        Some(Coordinate::new(lat / n, lng / n))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoReference(String);

impl PhotoReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PhotoSize {
    fn default() -> Self {
        Self {
            max_width: 500,
            max_height: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    pub rating: f64,
}

/// Normalized snapshot of a place as returned by the details call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: String,
    pub rating: f64,
    pub price_level: u8,
    pub location: Option<Coordinate>,
    pub types: Vec<String>,
    pub reviews: Vec<Review>,
    pub photos: Vec<PhotoReference>,
}

/// Review texts and ratings, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScorePayload {
    comments: Vec<String>,
    scores: Vec<f64>,
}

impl ScorePayload {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let (comments, scores) = reviews
            .iter()
            .map(|review| (review.text.clone(), review.rating))
            .unzip();
        Self { comments, scores }
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn mean_rating(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<f64>() / self.scores.len() as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainNode {
    pub id: PlaceId,
    pub name: String,
    pub location: Coordinate,
    pub score: ScorePayload,
    pub photo_url: String,
}

impl DomainNode {
    /// Mean review rating damped by the distance from `reference` in km.
    /// Scoring a node against its own location yields the plain mean.
    pub fn score(&self, reference: &Coordinate) -> f64 {
        let distance_km = self.location.distance_meters(reference) / 1000.0;
        self.score.mean_rating() / (1.0 + distance_km)
    }

    /// Whole stars (0..=5) for display.
    pub fn star_rating(&self) -> u8 {
        self.score(&self.location).round().clamp(0.0, 5.0) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Provider answered the details request with a non-OK status.
    Rejected(crate::domain::ports::ProviderStatus),
    /// Request never produced a usable answer.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub place_id: PlaceId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Built(DomainNode),
    Skipped(Skipped),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchReport {
    pub anchor: Option<Coordinate>,
    pub nodes: Vec<DomainNode>,
    pub skipped: Vec<Skipped>,
    pub markers: Vec<Coordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_at(location: Coordinate, ratings: &[f64]) -> DomainNode {
        let reviews: Vec<Review> = ratings
            .iter()
            .map(|r| Review {
                text: format!("rated {}", r),
                rating: *r,
            })
            .collect();
        DomainNode {
            id: PlaceId::from("n"),
            name: "n".to_string(),
            location,
            score: ScorePayload::from_reviews(&reviews),
            photo_url: String::new(),
        }
    }

    #[test]
    fn test_distance_between_known_points() {
        // Seoul Station -> City Hall, roughly 1.4 km
        let station = Coordinate::new(37.5547, 126.9706);
        let city_hall = Coordinate::new(37.5663, 126.9779);
        let d = station.distance_meters(&city_hall);
        assert!((1300.0..1600.0).contains(&d), "distance was {}", d);
        assert_eq!(station.distance_meters(&station), 0.0);
    }

    #[test]
    fn test_centroid() {
        assert!(Coordinate::centroid(&[]).is_none());
        let c = Coordinate::centroid(&[Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]).unwrap();
        assert_eq!(c, Coordinate::new(2.0, 3.0));
    }

    #[test]
    fn test_score_payload_is_aligned() {
        let payload = ScorePayload::from_reviews(&[
            Review {
                text: "great".to_string(),
                rating: 5.0,
            },
            Review {
                text: "meh".to_string(),
                rating: 2.0,
            },
        ]);
        assert_eq!(payload.comments(), &["great".to_string(), "meh".to_string()]);
        assert_eq!(payload.scores(), &[5.0, 2.0]);
        assert_eq!(payload.mean_rating(), 3.5);

        let empty = ScorePayload::from_reviews(&[]);
        assert!(empty.comments().is_empty());
        assert!(empty.scores().is_empty());
        assert_eq!(empty.mean_rating(), 0.0);
    }

    #[test]
    fn test_self_score_is_mean_rating() {
        let node = node_at(Coordinate::new(37.5, 127.0), &[4.0, 5.0]);
        assert_eq!(node.score(&node.location), 4.5);
        assert_eq!(node.star_rating(), 5);
    }

    #[test]
    fn test_score_decreases_with_distance() {
        let node = node_at(Coordinate::new(37.5, 127.0), &[4.0]);
        let near = node.score(&Coordinate::new(37.501, 127.0));
        let far = node.score(&Coordinate::new(37.6, 127.0));
        assert!(near > far);
        assert!(near < 4.0);
    }

    #[test]
    fn test_unrated_node_has_zero_stars() {
        let node = node_at(Coordinate::ORIGIN, &[]);
        assert_eq!(node.score(&Coordinate::new(1.0, 1.0)), 0.0);
        assert_eq!(node.star_rating(), 0);
    }
}
