//! Rendered frames and the surface they are written to

/// A run of output within one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Settled text (old or revealed characters), emitted verbatim
    Text(String),
    /// One noise glyph, styled apart from settled text
    Noise(char),
}

/// Full content of one animation frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Frame index this content was computed for
    pub frame: u32,
    /// Whether every position was revealed in this frame
    pub complete: bool,
    segments: Vec<Segment>,
}

impl RenderedFrame {
    pub fn new(frame: u32) -> Self {
        Self {
            frame,
            complete: false,
            segments: Vec::new(),
        }
    }

    /// Append settled characters, merging with a preceding text run
    pub fn push_text(&mut self, c: char) {
        if let Some(Segment::Text(run)) = self.segments.last_mut() {
            run.push(c);
        } else {
            self.segments.push(Segment::Text(c.to_string()));
        }
    }

    pub fn push_noise(&mut self, glyph: char) {
        self.segments.push(Segment::Noise(glyph));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of noise glyphs in this frame
    pub fn noise_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Noise(_)))
            .count()
    }

    /// Content without styling
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(run) => out.push_str(run),
                Segment::Noise(glyph) => out.push(*glyph),
            }
        }
        out
    }

    /// Content as markup, noise glyphs wrapped in `<span class="dud">`
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(run) => run.chars().for_each(|c| push_escaped(&mut out, c)),
                Segment::Noise(glyph) => {
                    out.push_str("<span class=\"dud\">");
                    push_escaped(&mut out, *glyph);
                    out.push_str("</span>");
                }
            }
        }
        out
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(c),
    }
}

/// Anything that can show a frame of text
///
/// `replace` swaps the whole content; surfaces never append.
pub trait DisplaySurface {
    /// Text currently displayed, used as the `from` side of the next run
    fn current_text(&self) -> String;

    /// Replace the displayed content with `frame`
    fn replace(&mut self, frame: &RenderedFrame);
}
