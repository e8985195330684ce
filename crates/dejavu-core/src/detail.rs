use std::collections::HashSet;

use dejavu_types::{DetailView, DisplaySize, PixelSize, Selection, TextRegion};

use crate::geometry;
use crate::route;

/// Regions of the image whose id is in the selection, in the image's own
/// region order. The ids are advisory: an id with no region behind it is
/// silently ignored.
pub fn selected_regions<'a>(
    regions: &'a [TextRegion],
    selection: &Selection,
) -> Vec<&'a TextRegion> {
    let wanted: HashSet<u32> = selection.text_ids.iter().copied().collect();
    regions.iter().filter(|r| wanted.contains(&r.id)).collect()
}

/// Builds the detail view model. `regions` is the image's region set when
/// the client has one from a search payload; on a cold navigation it is
/// `None` and the overlay list stays empty (the backend still burns the
/// highlights into the fetched pixels). Overlays are recomputed from
/// scratch for the given viewport, so callers re-run this on every resize.
pub fn build_detail(
    selection: &Selection,
    regions: Option<&[TextRegion]>,
    native: PixelSize,
    viewport: DisplaySize,
) -> DetailView {
    let display = geometry::fit_display(native, viewport);
    let overlays = regions
        .map(|regions| {
            geometry::map_regions(selected_regions(regions, selection), native, display)
        })
        .unwrap_or_default();

    DetailView {
        image_id: selection.image_id.clone(),
        image_url: route::api_image_path(selection),
        native,
        display,
        overlays,
    }
}

#[cfg(test)]
mod tests {
    use dejavu_types::OverlayBox;

    use super::*;

    fn region(id: u32, left: u32) -> TextRegion {
        TextRegion {
            id,
            image_id: "abc".to_string(),
            text: format!("text-{id}"),
            left,
            top: 10,
            width: 100,
            height: 20,
        }
    }

    const NATIVE: PixelSize = PixelSize {
        width: 800,
        height: 600,
    };

    const VIEWPORT: DisplaySize = DisplaySize {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn unknown_ids_are_ignored_without_error() {
        let regions = vec![region(1, 0), region(2, 200)];
        let selection = Selection::new("abc", vec![1, 2, 9]);

        let view = build_detail(&selection, Some(&regions), NATIVE, VIEWPORT);

        assert_eq!(view.overlays.len(), 2);
        assert_eq!(
            view.overlays[0],
            OverlayBox {
                left: 0.0,
                top: 10.0,
                width: 100.0,
                height: 20.0,
            }
        );
        assert_eq!(view.overlays[1].left, 200.0);
    }

    #[test]
    fn highlighting_keeps_the_image_region_order() {
        let regions = vec![region(5, 0), region(3, 100), region(8, 200)];
        // Selection order differs from region order.
        let selection = Selection::new("abc", vec![8, 5]);

        let picked = selected_regions(&regions, &selection);
        let ids: Vec<u32> = picked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 8]);
    }

    #[test]
    fn empty_selection_renders_no_overlays() {
        let regions = vec![region(1, 0)];
        let selection = Selection::new("abc", vec![]);

        let view = build_detail(&selection, Some(&regions), NATIVE, VIEWPORT);
        assert!(view.overlays.is_empty());
    }

    #[test]
    fn cold_navigation_has_no_overlay_list() {
        let selection = Selection::new("abc", vec![1, 2]);
        let view = build_detail(&selection, None, NATIVE, VIEWPORT);

        assert!(view.overlays.is_empty());
        assert_eq!(view.image_url, "/api/image?image_id=abc&text_ids=1,2");
    }

    #[test]
    fn overlays_follow_the_viewport() {
        let regions = vec![region(1, 400)];
        let selection = Selection::new("abc", vec![1]);

        let half = DisplaySize {
            width: 400.0,
            height: 300.0,
        };
        let view = build_detail(&selection, Some(&regions), NATIVE, half);

        assert_eq!(view.display.width, 400.0);
        assert_eq!(view.overlays[0].left, 200.0);
        assert_eq!(view.overlays[0].width, 50.0);
    }
}
