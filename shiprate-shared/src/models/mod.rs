pub mod lenient;
pub mod rates;
pub mod route;
pub mod shipment;

pub use rates::{BandedRate, ExpressRate, GoodsCategory, SeaRate, EXPRESS_SLAB_COUNT};
pub use route::{
    AvailableOptions, CountryCode, CountryRef, Direction, MethodRates, Route, RouteScope,
    ShippingMethod, ShippingOptionConfig,
};
pub use shipment::{ContainerType, ShipmentRequest};
