//! Listing locator: decides which page(s) of a report hold the breaker
//! listing, and whether the report bundles two physical units.

/// Marker printed on the header page of each physical unit.
pub const PANEL_MARKS_MARKER: &str = "PANEL MARKS";

/// The located breaker listing text of one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub text: String,
    /// True when the report describes two physical panels.
    pub double_unit: bool,
}

/// Strategy for locating the breaker listing within a report's pages.
/// Panel reports are not uniformly structured, so the selection rules are
/// pluggable per layout.
pub trait ListingLocator: Send + Sync {
    fn locate(&self, pages: &[String]) -> Listing;
}

/// Production heuristic for the current report layouts:
/// - 2 pages: the listing is page index 1;
/// - 3 pages: pages 1 and 2, newline-joined;
/// - otherwise, two or more `PANEL MARKS` pages mean a double-unit report
///   and the listing sits right after the second marker (clamped to the
///   last page); with fewer markers, fall back to page index 1.
///
/// Out-of-range or blank pages read as empty text, never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLocator;

impl ListingLocator for StandardLocator {
    fn locate(&self, pages: &[String]) -> Listing {
        match pages.len() {
            2 => Listing {
                text: pages[1].clone(),
                double_unit: false,
            },
            3 => Listing {
                text: format!("{}\n{}", pages[1], pages[2]),
                double_unit: false,
            },
            _ => {
                let marker_pages: Vec<usize> = pages
                    .iter()
                    .enumerate()
                    .filter(|(_, text)| text.contains(PANEL_MARKS_MARKER))
                    .map(|(i, _)| i)
                    .collect();

                if marker_pages.len() >= 2 {
                    let index = (marker_pages[1] + 1).min(pages.len() - 1);
                    Listing {
                        text: pages[index].clone(),
                        double_unit: true,
                    }
                } else {
                    Listing {
                        text: pages.get(1).cloned().unwrap_or_default(),
                        double_unit: false,
                    }
                }
            }
        }
    }
}
