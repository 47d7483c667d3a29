// Endpoint wrappers
//
// One module per endpoint family. Each query struct mirrors the vendor's
// parameter list; unset fields are dropped from the query string.

mod data;
mod devices;
mod events;
mod power_curves;

pub use data::{DataQuery, RealTimeDataQuery};
pub use devices::DevicesQuery;
pub use events::{ActiveAlertsQuery, ActiveStatusQuery, AlertsQuery, Paging, StatusEventsQuery};
pub use power_curves::PowerCurvesQuery;
