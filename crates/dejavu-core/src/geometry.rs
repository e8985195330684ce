use dejavu_types::{DisplaySize, OverlayBox, PixelSize, TextRegion};

/// Scale factors from native to display space. A degenerate native size
/// maps everything to zero instead of dividing by it.
pub fn scale_factors(native: PixelSize, display: DisplaySize) -> (f64, f64) {
    if native.width == 0 || native.height == 0 {
        return (0.0, 0.0);
    }
    (
        display.width / f64::from(native.width),
        display.height / f64::from(native.height),
    )
}

/// Display size for an image fitted into the viewport, aspect preserved.
/// Images are scaled down to fit but never upscaled, so an image smaller
/// than the viewport renders at native size and the overlay mapping is the
/// identity.
pub fn fit_display(native: PixelSize, viewport: DisplaySize) -> DisplaySize {
    if native.width == 0 || native.height == 0 {
        return DisplaySize {
            width: 0.0,
            height: 0.0,
        };
    }
    let scale = (viewport.width / f64::from(native.width))
        .min(viewport.height / f64::from(native.height))
        .min(1.0);
    DisplaySize {
        width: f64::from(native.width) * scale,
        height: f64::from(native.height) * scale,
    }
}

/// Region box clamped to the image's native bounds. Out-of-bounds boxes are
/// tolerated by clamping, never a crash.
pub fn clamp_to_native(region: &TextRegion, native: PixelSize) -> (u32, u32, u32, u32) {
    let left = region.left.min(native.width);
    let top = region.top.min(native.height);
    let width = region.width.min(native.width - left);
    let height = region.height.min(native.height - top);
    (left, top, width, height)
}

/// Maps one region into display coordinates. Pure and synchronous; callers
/// recompute it on every displayed-size change.
pub fn map_region(region: &TextRegion, native: PixelSize, display: DisplaySize) -> OverlayBox {
    let (sx, sy) = scale_factors(native, display);
    let (left, top, width, height) = clamp_to_native(region, native);
    OverlayBox {
        left: f64::from(left) * sx,
        top: f64::from(top) * sy,
        width: f64::from(width) * sx,
        height: f64::from(height) * sy,
    }
}

pub fn map_regions<'a>(
    regions: impl IntoIterator<Item = &'a TextRegion>,
    native: PixelSize,
    display: DisplaySize,
) -> Vec<OverlayBox> {
    regions
        .into_iter()
        .map(|region| map_region(region, native, display))
        .collect()
}
