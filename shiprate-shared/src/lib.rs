pub mod error;
pub mod models;

pub use error::ValidationError;
pub use models::{
    AvailableOptions, BandedRate, ContainerType, CountryCode, CountryRef, Direction, ExpressRate,
    GoodsCategory, MethodRates, Route, RouteScope, SeaRate, ShipmentRequest, ShippingMethod,
    ShippingOptionConfig, EXPRESS_SLAB_COUNT,
};
