pub mod app_config;
pub mod categories;
pub mod config;
pub mod domain;
pub mod error;
pub mod geo;

pub use app_config::{AppConfig, Environment};
pub use categories::{
    load_categories, CategoryRule, CategoryTable, DomainRules, EbtLikelihood, FallbackName,
    TagFilter,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use domain::{Coordinate, Location, SearchDomain};
pub use error::ConfigError;
pub use geo::{distance_miles, miles_to_meters, EARTH_RADIUS_MILES, METERS_PER_MILE};
