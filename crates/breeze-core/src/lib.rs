// breeze-core: Object model over the Breeze API (root -> sites -> devices -> signals).
//
// Everything here is single-threaded by construction: entities are shared
// through `Rc` and mutated through `RefCell`, so none of the model types
// are `Send`.

pub mod api;
pub mod cache;
pub mod collection;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod series;
pub mod window;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::{Aggregate, Breeze, FetchedSeries, SeriesRequest};
pub use cache::{DedupCache, Fingerprint};
pub use collection::{
    DeviceList, DeviceSelector, EntityList, Selector, SignalSource, SiteList, SiteSelector,
};
pub use config::BreezeConfig;
pub use error::CoreError;
pub use registry::SignalRegistry;
pub use series::Series;
pub use window::TimeWindow;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Device, DeviceKind, Entity, EntityKey, EntityKind, Location, Signal, SignalMap, Site, SiteKind,
};

// The transport seam, so callers can plug in their own without a direct
// dependency on breeze-api.
pub use breeze_api::{QueryParams, Transport};
