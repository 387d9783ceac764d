pub mod aggregate;
pub mod countdown;
pub mod cross_match;
pub mod generation;
pub mod merge;
pub mod refresh;
pub mod store;
pub mod transfer;
pub mod view;

pub use aggregate::{AggregateError, Aggregator};
pub use countdown::{countdown_info, CountdownInfo, CountdownMode};
pub use cross_match::{attach_tv_schedule, find_tv_counterpart, resolve_with_schedule, TvCatalog};
pub use generation::ViewGeneration;
pub use merge::{merge_fragments, refreshed_show};
pub use refresh::{compute_next_episode, is_stale, refresh_all, refresh_all_with, STALENESS_HOURS};
pub use store::TrackedStore;
pub use transfer::{
    export_shows, import_merge, import_replace, parse_export, ExportFile, ImportOutcome,
    TransferError,
};
pub use view::{filter_by_status, paginate, sort_shows, Page};
