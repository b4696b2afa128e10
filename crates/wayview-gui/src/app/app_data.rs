use wayview::cache::GraphCache;
use wayview::route::RequestTracker;
use wayview::selection::SelectionState;
use wayview::types::{DisplayMode, RouteResult};

use crate::types::Dirty;

/// Everything the UI mutates, owned by the app instead of floating as
/// globals. Constructed once per session and torn down with the window.
pub struct AppData {
    pub mode: DisplayMode,
    /// Set when the mode is changed outside the checkbox path (currently
    /// only the failure fallback) so the layer visibility gets reapplied.
    pub mode_changed: bool,

    pub city_input: String,
    pub start_input: String,
    pub end_input: String,

    pub selection: SelectionState,
    pub cache: GraphCache,
    pub routes: RequestTracker,

    /// A graph fetch is in flight; suppresses issuing a second one for
    /// the same mode toggle.
    pub graph_inflight: bool,
    /// Loading indicator text; `None` hides the indicator.
    pub busy: Option<String>,
    /// Queued alert body, displayed by the error modal and then cleared.
    pub alert: Option<String>,

    /// City whose cached snapshot the wireframe layers should display.
    pub wireframe_for: Option<Dirty<String>>,
    /// The route to draw and report statistics for.
    pub route: Option<Dirty<RouteResult>>,
}

impl AppData {
    pub fn new(city: String) -> Self {
        Self {
            mode: DisplayMode::Tile,
            mode_changed: false,
            city_input: city,
            start_input: String::new(),
            end_input: String::new(),
            selection: SelectionState::new(),
            cache: GraphCache::new(),
            routes: RequestTracker::new(),
            graph_inflight: false,
            busy: None,
            alert: None,
            wireframe_for: None,
            route: None,
        }
    }
}
