mod record;
mod soil_type;

pub use record::{NewRecord, Record};
pub use soil_type::SoilType;
