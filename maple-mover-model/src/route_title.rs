/// The parts of a composite TTC route title.
///
/// Feeds and older route listings describe a route with one long string, like
/// `"504 - 504-King West - 504a King towards Dundas West Station"`.
/// Cards want the pieces separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTitle<'a> {
    /// The route number ("504").
    ///
    /// This is the text before the first `" - "` separator,
    /// or the first word when there is no separator.
    pub number: &'a str,
    /// The display name ("504-King West").
    ///
    /// This is the second `" - "` segment when present, or the whole title.
    pub name: &'a str,
    /// Where the vehicle is headed ("Dundas West Station"), if the title says.
    pub destination: Option<&'a str>,
}

const SEGMENT_SEPARATOR: &str = " - ";
const DESTINATION_MARKER: &str = "towards";

impl<'a> RouteTitle<'a> {
    pub fn parse(title: &'a str) -> Self {
        let title = title.trim();
        let mut segments = title.split(SEGMENT_SEPARATOR);
        // `split` always yields at least one segment.
        let first = segments.next().unwrap_or_default();

        let (number, name) = match segments.next() {
            Some(second) => (first.trim(), second.trim()),
            None => (title.split_whitespace().next().unwrap_or_default(), title),
        };

        Self {
            number,
            name,
            destination: destination_of(title),
        }
    }
}

/// Extracts the text after the last "towards" in a title, if it isn't blank.
fn destination_of(title: &str) -> Option<&str> {
    title
        .rsplit_once(DESTINATION_MARKER)
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
}
