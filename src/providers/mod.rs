//! Bridges to the external collaborators: device location, geocoding, map widget

pub mod geocode;
pub mod location;
pub mod map;

pub use geocode::{GeocodeCandidate, Geocoder, GeocoderConfig, NominatimGeocoder};
pub use location::{DeviceLocation, DevicePosition, LocationProvider, PermissionGrant};
pub use map::{MapHandle, WebviewMap, MAP_RECENTER_EVENT};
