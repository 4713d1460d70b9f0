use scan::locate::DEFAULT_LINEAR_SPAN;

/// Controller configuration, supplied by the excluded configuration layer.
#[derive(Clone, Copy, Debug)]
pub struct ScanConfig {
    /// Master switch; scans are no-ops while off, and turning it off tears
    /// down any active highlight.
    pub enabled: bool,
    /// Window size at which the locator's bisection hands over to a linear
    /// scan. Empirical; see [`scan::CharLocator`].
    pub linear_span: usize,
    /// Viewport size used for tooltip placement.
    pub viewport: (f32, f32),
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            enabled: true,
            linear_span: DEFAULT_LINEAR_SPAN,
            viewport: (1280.0, 800.0),
        }
    }
}
