//! Rule compilation: sorted conditions to three regex fragments.

use regex::Regex;

use crate::error::RuleParseError;

use super::condition::{parse_condition, split_conditions, ChunkSpec, Condition, Region};

/// A compiled rewrite rule.
///
/// Compilation sorts the parsed conditions by [`Condition::rank`] and
/// walks them once per region: a left generator, a middle (kernel)
/// generator, and a right generator, each consuming its band of the
/// sorted list and handing the stop index to the next. The resulting
/// fragments match against the canonical sentence form produced by
/// [`ChunkedSentence::canonical`](crate::ChunkedSentence::canonical).
#[derive(Debug, Clone)]
pub struct Rule {
    conditions: Vec<Condition>,
    kernel_source: usize,
    kernel_target: usize,
    left: String,
    middle: String,
    right: String,
}

impl Rule {
    /// Parse and compile a rule string such as
    /// `chunk(A,left,np), inx(A,center:x,1,great), chunk(A,right,np).`
    pub fn parse(text: &str) -> Result<Self, RuleParseError> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_suffix('.')
            .ok_or(RuleParseError::MissingTerminator)?
            .trim();
        if body.is_empty() {
            return Err(RuleParseError::Empty);
        }

        let mut conditions = Vec::new();
        for (index, part) in split_conditions(body).into_iter().enumerate() {
            conditions.push(parse_condition(&part, index)?);
        }
        let (kernel_source, kernel_target) = kernel_dims(&conditions);
        validate_center_positions(&conditions, kernel_source)?;

        // Stable: equal-rank conditions keep their written order.
        conditions.sort_by_key(Condition::rank);

        let (left, stop) = generate_left(&conditions);
        let (middle, stop) = generate_middle(&conditions, stop, kernel_source);
        let right = generate_right(&conditions, stop);

        Ok(Self {
            conditions,
            kernel_source,
            kernel_target,
            left,
            middle,
            right,
        })
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Number of kernel tokens the rule matches.
    pub fn kernel_source(&self) -> usize {
        self.kernel_source
    }

    /// Kernel size after rewriting.
    pub fn kernel_target(&self) -> usize {
        self.kernel_target
    }

    pub fn left_pattern(&self) -> &str {
        &self.left
    }

    pub fn middle_pattern(&self) -> &str {
        &self.middle
    }

    pub fn right_pattern(&self) -> &str {
        &self.right
    }

    /// Full pattern with the three fragments captured.
    pub fn pattern(&self) -> String {
        format!("({}) ({}) ({})", self.left, self.middle, self.right)
    }

    /// Compile the full pattern.
    pub fn regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.pattern())
    }
}

/// Kernel dimensions: an explicit `dim:` condition wins, otherwise the
/// largest positive center position (at least 1), unchanged by rewriting.
fn kernel_dims(conditions: &[Condition]) -> (usize, usize) {
    for c in conditions {
        if let Condition::Dim { source, target } = c {
            return (*source, *target);
        }
    }
    let inferred = conditions
        .iter()
        .filter_map(|c| match c {
            Condition::Literal {
                region: Region::Center,
                position,
                ..
            }
            | Condition::Pos {
                region: Region::Center,
                position,
                ..
            } if *position > 0 => Some(*position as usize),
            _ => None,
        })
        .max()
        .unwrap_or(1)
        .max(1);
    (inferred, inferred)
}

/// Reject center positions that fall outside the kernel: a positive
/// position past the kernel end, or a negative one reaching before the
/// kernel start. Dropping the constraint silently would compile a rule
/// looser than written.
fn validate_center_positions(
    conditions: &[Condition],
    kernel: usize,
) -> Result<(), RuleParseError> {
    for (index, c) in conditions.iter().enumerate() {
        if let Condition::Literal {
            region: Region::Center,
            position,
            ..
        }
        | Condition::Pos {
            region: Region::Center,
            position,
            ..
        } = c
        {
            let in_range = if *position > 0 {
                *position as usize <= kernel
            } else {
                kernel as i32 + 1 + position >= 1
            };
            if !in_range {
                return Err(RuleParseError::BadPosition {
                    index,
                    region: "center:x".to_string(),
                    position: *position,
                });
            }
        }
    }
    Ok(())
}

/// One kernel slot: surface and tag constraints, both open by default.
#[derive(Clone)]
struct Slot {
    surface: Option<String>,
    tag: Option<String>,
}

impl Slot {
    fn open() -> Self {
        Self {
            surface: None,
            tag: None,
        }
    }

    fn render(&self) -> String {
        match (&self.surface, &self.tag) {
            (None, None) => "[^ ]*".to_string(),
            (s, t) => format!(
                "{}/{}",
                s.as_deref().unwrap_or("[^ ]*"),
                t.as_deref().unwrap_or("[^ ]*")
            ),
        }
    }
}

fn chunk_fragment(tag: &str) -> String {
    format!("{tag}:<[^>]*>:{tag}")
}

/// Slot for 1-based position `position`, growing the vector with open
/// slots so skipped positions render as `[^ ]*` wildcards.
fn positional_slot(slots: &mut Vec<Slot>, position: i32) -> &mut Slot {
    let p = position.max(1) as usize;
    if slots.len() < p {
        slots.resize(p, Slot::open());
    }
    &mut slots[p - 1]
}

/// Render the left fragment: a free `.*` prefix, the positional slots
/// from the farthest constrained position down to position 1 (skipped
/// positions padded with `[^ ]*`), then the left chunk if present.
fn generate_left(conditions: &[Condition]) -> (String, usize) {
    let mut slots: Vec<Slot> = Vec::new();
    let mut chunk: Option<&str> = None;
    let mut stop = 0;
    for (i, c) in conditions.iter().enumerate() {
        match c.region() {
            None => {
                stop = i + 1;
            }
            Some(Region::Left) => {
                stop = i + 1;
                match c {
                    Condition::Chunk {
                        spec: ChunkSpec::Single(tag),
                        ..
                    } => chunk = Some(tag),
                    Condition::Literal {
                        position, token, ..
                    } => {
                        positional_slot(&mut slots, *position).surface =
                            Some(regex::escape(token));
                    }
                    Condition::Pos { position, tag, .. } => {
                        positional_slot(&mut slots, *position).tag = Some(regex::escape(tag));
                    }
                    _ => {}
                }
            }
            Some(_) => break,
        }
    }
    let mut parts = vec![".*".to_string()];
    parts.extend(slots.iter().rev().map(Slot::render));
    if let Some(tag) = chunk {
        parts.push(chunk_fragment(tag));
    }
    (parts.join(" "), stop)
}

/// Render the kernel fragment from the center band starting at `start`.
///
/// Positive positions index kernel slots from the start; negative
/// positions index from the end (`-1` is the last slot). A center chunk
/// condition wraps the slots in chunk delimiters; with no positional
/// constraint the chunk body stays fully open.
fn generate_middle(conditions: &[Condition], start: usize, kernel: usize) -> (String, usize) {
    let mut slots = vec![Slot::open(); kernel];
    let mut constrained = false;
    let mut chunk: Option<&ChunkSpec> = None;
    let mut stop = start;

    for (i, c) in conditions.iter().enumerate().skip(start) {
        match c.region() {
            Some(Region::Center) => {
                stop = i + 1;
                match c {
                    Condition::Chunk { spec, .. } => chunk = Some(spec),
                    Condition::Literal {
                        position, token, ..
                    } => {
                        if let Some(slot) = slot_at(&mut slots, *position, kernel) {
                            slot.surface = Some(regex::escape(token));
                            constrained = true;
                        }
                    }
                    Condition::Pos { position, tag, .. } => {
                        if let Some(slot) = slot_at(&mut slots, *position, kernel) {
                            slot.tag = Some(regex::escape(tag));
                            constrained = true;
                        }
                    }
                    Condition::Dim { .. } => {}
                }
            }
            _ => break,
        }
    }

    let body = if constrained {
        slots
            .iter()
            .map(Slot::render)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        "[^>]*".to_string()
    };

    let middle = match chunk {
        None => {
            if constrained {
                body
            } else {
                // No center condition at all: any kernel-sized token run.
                vec!["[^ ]*"; kernel].join(" ")
            }
        }
        Some(ChunkSpec::Single(tag)) => format!("{tag}:<{body}>:{tag}"),
        Some(ChunkSpec::Sequential(a, b)) => {
            format!("{a}:<{body}>:{a} {}", chunk_fragment(b))
        }
        Some(ChunkSpec::Spanned(a, b)) => {
            format!("{a}:<{body}>:{a} .* {}", chunk_fragment(b))
        }
    };
    (middle, stop)
}

fn slot_at(slots: &mut [Slot], position: i32, kernel: usize) -> Option<&mut Slot> {
    let index = if position > 0 {
        position as usize
    } else {
        let shifted = kernel as i32 + 1 + position;
        if shifted < 1 {
            return None;
        }
        shifted as usize
    };
    slots.get_mut(index - 1)
}

/// Render the right fragment: positional slots from position 1 outward
/// (skipped positions padded with `[^ ]*`), the right chunk if present,
/// then a free `.*` suffix.
fn generate_right(conditions: &[Condition], start: usize) -> String {
    let mut slots: Vec<Slot> = Vec::new();
    let mut chunk: Option<&str> = None;
    for c in &conditions[start..] {
        match c {
            Condition::Chunk {
                spec: ChunkSpec::Single(tag),
                ..
            } => chunk = Some(tag),
            Condition::Literal {
                position, token, ..
            } => {
                positional_slot(&mut slots, *position).surface = Some(regex::escape(token));
            }
            Condition::Pos { position, tag, .. } => {
                positional_slot(&mut slots, *position).tag = Some(regex::escape(tag));
            }
            _ => {}
        }
    }
    let mut parts: Vec<String> = slots.iter().map(Slot::render).collect();
    if let Some(tag) = chunk {
        parts.push(chunk_fragment(tag));
    }
    parts.push(".*".to_string());
    parts.join(" ")
}
