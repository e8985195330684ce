use serde::{Deserialize, Serialize};

/// One image that satisfied a query, with the text regions that matched.
/// `texts` keeps the backend's order; it is replaced wholesale on a new
/// query, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub image_id: String,
    pub texts: Vec<TextRegion>,
}

/// One OCR span located inside an image. The bounding box is in the
/// original image's pixel coordinates, not the displayed ones. `id` is only
/// unique within the owning image; `(image_id, id)` is the real key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    pub id: u32,
    pub image_id: String,
    pub text: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// A single search request. An empty keyword is legal and may yield an
/// empty result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
}

/// What to show in the detail view: an image and the ordered text-region
/// ids the originating click corresponds to. Built on a grid click,
/// serialized into the location, parsed back by the detail view, never
/// persisted. Hashable so it can key the image cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub image_id: String,
    pub text_ids: Vec<u32>,
}

impl Selection {
    pub fn new(image_id: impl Into<String>, text_ids: Vec<u32>) -> Self {
        Self {
            image_id: image_id.into(),
            text_ids,
        }
    }
}

/// Original (unscaled) image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

/// On-screen dimensions, possibly scaled from native size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

/// A text-region box mapped into display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// One clickable result tile.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTile {
    pub image_id: String,
    /// Matched text snippets, in the match's own order.
    pub matched: Vec<String>,
    /// Backend image URL (thumbnail), with advisory text ids.
    pub image_url: String,
    /// Detail location this tile navigates to.
    pub target: String,
}

/// The result grid for one keyword, already truncated to the render limit.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub keyword: String,
    pub tiles: Vec<GridTile>,
    /// Matches dropped by truncation (no pagination).
    pub dropped: usize,
}

/// The detail view for one selection, with overlay boxes recomputed for the
/// current display size.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub image_id: String,
    pub image_url: String,
    pub native: PixelSize,
    pub display: DisplaySize,
    pub overlays: Vec<OverlayBox>,
}

/// Everything that travels between the app loop and the presenter loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Ui(UiEvent),
    /// A search fetch reached a terminal state; the keyword stamps the
    /// arrival so stale results can be discarded against the current route.
    SearchResolved { keyword: String },
    /// An image fetch reached a terminal state, stamped by its selection.
    ImageResolved { selection: Selection },
    LocationChanged(String),
    View(ViewUpdate),
    Shutdown,
}

/// User intents collected by the input reader.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SubmitKeyword(String),
    /// Open the nth tile of the current grid.
    OpenResult(usize),
    /// Navigate to a raw location string.
    OpenLocation(String),
    Back,
    Forward,
    Reload,
    ViewportResized { width: f64, height: f64 },
    Quit,
}

/// What the presenter should currently show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// No query yet, or a placeholder for malformed detail parameters.
    Blank,
    SearchPending { keyword: String },
    Grid(GridView),
    DetailPending { image_id: String },
    Detail(DetailView),
    /// A recovered fetch failure; retry is a user re-navigation.
    Unavailable { message: String },
}
