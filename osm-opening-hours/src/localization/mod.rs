pub(crate) mod almanac;
pub(crate) mod coordinates;
pub(crate) mod location;

pub use crate::localization::almanac::{Almanac, SunriseAlmanac};
pub use crate::localization::coordinates::Coordinates;
pub use crate::localization::location::Location;
