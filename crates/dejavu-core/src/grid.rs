use dejavu_types::{GridTile, GridView, Match, Selection};

use crate::route::{self, Route};

/// Upper bound on rendered tiles. Matches past the limit are dropped, not
/// paginated; backend order is implied relevance.
pub const GRID_LIMIT: usize = 20;

/// Builds the grid view model for a resolved search. Each tile's target is
/// the detail location for a Selection of all that match's text ids, in the
/// texts' own order. A match with no localized texts (a filename-level hit)
/// still gets a tile with an empty id set.
pub fn build_grid(keyword: &str, matches: &[Match]) -> GridView {
    let tiles = matches
        .iter()
        .take(GRID_LIMIT)
        .map(|m| {
            let selection = Selection::new(
                m.image_id.clone(),
                m.texts.iter().map(|t| t.id).collect::<Vec<_>>(),
            );
            GridTile {
                image_id: m.image_id.clone(),
                matched: m.texts.iter().map(|t| t.text.clone()).collect(),
                image_url: route::api_image_path(&selection),
                target: Route::detail(selection).to_location(),
            }
        })
        .collect::<Vec<_>>();

    GridView {
        keyword: keyword.to_string(),
        dropped: matches.len().saturating_sub(tiles.len()),
        tiles,
    }
}
