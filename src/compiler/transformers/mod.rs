mod context;
pub use context::*;
mod flow_def_to_ts_def;
pub use flow_def_to_ts_def::flow_def_to_ts_def;
mod flow_to_flow_def;
pub use flow_to_flow_def::flow_to_flow_def;
mod ts_def_to_flow_def;
pub use ts_def_to_flow_def::ts_def_to_flow_def;
