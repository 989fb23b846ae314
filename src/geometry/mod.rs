pub mod measure;
pub mod ring;

pub use measure::{
    area, centroid, geodesic_area, planar_area, planar_signed_area, signed_area,
};
pub use ring::Ring;
