//! Rule-condition parsing and ranking.
//!
//! Each condition literal is parsed once into a structured [`Condition`];
//! nothing downstream re-parses strings. The numeric [`Condition::rank`]
//! defines the total order the pattern generators depend on: left-region
//! conditions sort below 100 (farthest position first), center conditions
//! between 100 and 200, right conditions above 200, with chunk conditions
//! anchoring each region's band at 100/200/300 and the kernel dimension
//! declaration always first at rank 5.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RuleParseError;

/// Context region a condition constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Left,
    Center,
    Right,
}

impl Region {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" | "center:x" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Chunk-tag constraint; center conditions may span two chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkSpec {
    /// A single chunk tag (`np`).
    Single(String),
    /// Two sequential chunks (`np-vp`).
    Sequential(String, String),
    /// Two chunks with arbitrary material between them (`np*vp`).
    Spanned(String, String),
}

impl ChunkSpec {
    fn parse(tag: &str) -> Self {
        if let Some((a, b)) = tag.split_once('-') {
            Self::Sequential(a.to_lowercase(), b.to_lowercase())
        } else if let Some((a, b)) = tag.split_once('*') {
            Self::Spanned(a.to_lowercase(), b.to_lowercase())
        } else {
            Self::Single(tag.to_lowercase())
        }
    }

    fn is_multi(&self) -> bool {
        !matches!(self, Self::Single(_))
    }
}

/// One parsed rule condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// `dim:X--->Y` — kernel size X shrinking to Y.
    Dim { source: usize, target: usize },
    /// `chunk(V,region,tag)` — the region's chunk carries this tag.
    Chunk { region: Region, spec: ChunkSpec },
    /// `inx(V,region,pos,token)` — a literal token at a position.
    Literal {
        region: Region,
        position: i32,
        token: String,
    },
    /// `pos(V,region,pos,TAG)` — a POS predicate at a position.
    Pos {
        region: Region,
        position: i32,
        tag: String,
    },
}

impl Condition {
    /// Numeric rank defining the total condition order (ascending).
    ///
    /// Left positional ranks descend as the position grows
    /// (`100 − (2p − bit)`), so closer-to-kernel positions sort *later*
    /// within the left band. Center positions split on sign: positive
    /// (offset from kernel start) rank `100 + 2p + bit`; negative
    /// (offset from kernel end) rank `200 − bit`. Right positions rank
    /// `200 + 2p + bit`. The POS-predicate bit breaks ties against
    /// literal conditions at the same position.
    pub fn rank(&self) -> i32 {
        match self {
            Self::Dim { .. } => 5,
            Self::Chunk { region, .. } => match region {
                Region::Left => 100,
                Region::Center => 200,
                Region::Right => 300,
            },
            Self::Literal {
                region, position, ..
            } => positional_rank(*region, *position, 0),
            Self::Pos {
                region, position, ..
            } => positional_rank(*region, *position, 1),
        }
    }

    /// Region of a non-dim condition.
    pub fn region(&self) -> Option<Region> {
        match self {
            Self::Dim { .. } => None,
            Self::Chunk { region, .. }
            | Self::Literal { region, .. }
            | Self::Pos { region, .. } => Some(*region),
        }
    }
}

fn positional_rank(region: Region, position: i32, pos_bit: i32) -> i32 {
    match region {
        Region::Left => 100 - (2 * position - pos_bit),
        Region::Center => {
            if position > 0 {
                100 + 2 * position + pos_bit
            } else {
                200 - pos_bit
            }
        }
        Region::Right => 200 + 2 * position + pos_bit,
    }
}

fn dim_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^dim:(\d+)--->(\d+)$").expect("static regex"))
}

fn chunk_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^chunk\(\w+,(left|center|right),([A-Za-z]+(?:[-*][A-Za-z]+)?)\)$")
            .expect("static regex")
    })
}

fn positional_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(inx|pos)\(\w+,(left|center:x|right),(-?\d+),([^,()]+)\)$")
            .expect("static regex")
    })
}

/// Split a rule body on the commas separating condition literals
/// (commas inside parentheses belong to the literal).
pub(super) fn split_conditions(body: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in body.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                out.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let last = current.trim();
    if !last.is_empty() {
        out.push(last.to_string());
    }
    out
}

/// Parse one condition literal.
pub(super) fn parse_condition(text: &str, index: usize) -> Result<Condition, RuleParseError> {
    if let Some(caps) = dim_re().captures(text) {
        let source: usize = caps[1].parse().map_err(|_| bad(text, index))?;
        let target: usize = caps[2].parse().map_err(|_| bad(text, index))?;
        return Ok(Condition::Dim { source, target });
    }

    if let Some(caps) = chunk_re().captures(text) {
        let region = Region::from_str(&caps[1]).ok_or_else(|| bad(text, index))?;
        let spec = ChunkSpec::parse(&caps[2]);
        if spec.is_multi() && region != Region::Center {
            return Err(RuleParseError::MultiChunkOutsideCenter {
                index,
                tag: caps[2].to_string(),
            });
        }
        return Ok(Condition::Chunk { region, spec });
    }

    if let Some(caps) = positional_re().captures(text) {
        let region = Region::from_str(&caps[2]).ok_or_else(|| bad(text, index))?;
        let position: i32 = caps[3].parse().map_err(|_| bad(text, index))?;
        if position == 0 || (position < 0 && region != Region::Center) {
            return Err(RuleParseError::BadPosition {
                index,
                region: caps[2].to_string(),
                position,
            });
        }
        let value = caps[4].trim().to_string();
        return Ok(match &caps[1] {
            "inx" => Condition::Literal {
                region,
                position,
                token: value,
            },
            _ => Condition::Pos {
                region,
                position,
                tag: value.to_uppercase(),
            },
        });
    }

    Err(bad(text, index))
}

fn bad(text: &str, index: usize) -> RuleParseError {
    RuleParseError::BadCondition {
        index,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dim() {
        assert_eq!(
            parse_condition("dim:2--->1", 0).unwrap(),
            Condition::Dim {
                source: 2,
                target: 1
            }
        );
    }

    #[test]
    fn test_parse_chunk_variants() {
        assert_eq!(
            parse_condition("chunk(A,left,np)", 0).unwrap(),
            Condition::Chunk {
                region: Region::Left,
                spec: ChunkSpec::Single("np".into())
            }
        );
        assert_eq!(
            parse_condition("chunk(A,center,np-vp)", 0).unwrap(),
            Condition::Chunk {
                region: Region::Center,
                spec: ChunkSpec::Sequential("np".into(), "vp".into())
            }
        );
        assert_eq!(
            parse_condition("chunk(A,center,np*vp)", 0).unwrap(),
            Condition::Chunk {
                region: Region::Center,
                spec: ChunkSpec::Spanned("np".into(), "vp".into())
            }
        );
    }

    #[test]
    fn test_multi_chunk_outside_center_rejected() {
        let err = parse_condition("chunk(A,left,np-vp)", 3).unwrap_err();
        assert_eq!(
            err,
            RuleParseError::MultiChunkOutsideCenter {
                index: 3,
                tag: "np-vp".into()
            }
        );
    }

    #[test]
    fn test_parse_positional() {
        assert_eq!(
            parse_condition("inx(A,center:x,1,great)", 0).unwrap(),
            Condition::Literal {
                region: Region::Center,
                position: 1,
                token: "great".into()
            }
        );
        assert_eq!(
            parse_condition("pos(A,left,2,nn)", 0).unwrap(),
            Condition::Pos {
                region: Region::Left,
                position: 2,
                tag: "NN".into()
            }
        );
        assert_eq!(
            parse_condition("inx(A,center:x,-1,fast)", 0).unwrap(),
            Condition::Literal {
                region: Region::Center,
                position: -1,
                token: "fast".into()
            }
        );
    }

    #[test]
    fn test_bad_positions_rejected() {
        assert!(matches!(
            parse_condition("inx(A,left,0,tok)", 0).unwrap_err(),
            RuleParseError::BadPosition { position: 0, .. }
        ));
        assert!(matches!(
            parse_condition("inx(A,left,-2,tok)", 0).unwrap_err(),
            RuleParseError::BadPosition { position: -2, .. }
        ));
        assert!(matches!(
            parse_condition("inx(A,right,-1,tok)", 0).unwrap_err(),
            RuleParseError::BadPosition { .. }
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            parse_condition("frob(A,left,1)", 2).unwrap_err(),
            RuleParseError::BadCondition { index: 2, .. }
        ));
    }

    #[test]
    fn test_rank_order() {
        let dim = parse_condition("dim:2--->1", 0).unwrap();
        let left3 = parse_condition("inx(A,left,3,a)", 0).unwrap();
        let left1 = parse_condition("inx(A,left,1,b)", 0).unwrap();
        let left1_pos = parse_condition("pos(A,left,1,nn)", 0).unwrap();
        let chunk_l = parse_condition("chunk(A,left,np)", 0).unwrap();
        let center1 = parse_condition("inx(A,center:x,1,c)", 0).unwrap();
        let center_neg = parse_condition("inx(A,center:x,-1,d)", 0).unwrap();
        let chunk_c = parse_condition("chunk(A,center,np)", 0).unwrap();
        let right1 = parse_condition("inx(A,right,1,e)", 0).unwrap();
        let chunk_r = parse_condition("chunk(A,right,np)", 0).unwrap();

        assert_eq!(dim.rank(), 5);
        assert_eq!(left3.rank(), 94);
        assert_eq!(left1.rank(), 98);
        assert_eq!(left1_pos.rank(), 99);
        assert_eq!(chunk_l.rank(), 100);
        assert_eq!(center1.rank(), 102);
        assert_eq!(center_neg.rank(), 200);
        assert_eq!(chunk_c.rank(), 200);
        assert_eq!(right1.rank(), 202);
        assert_eq!(chunk_r.rank(), 300);

        // Farther-left positions sort earlier; regions band cleanly.
        let mut ranks = vec![
            chunk_r.rank(),
            right1.rank(),
            chunk_c.rank(),
            center1.rank(),
            chunk_l.rank(),
            left1.rank(),
            left3.rank(),
            dim.rank(),
        ];
        ranks.sort_unstable();
        assert_eq!(ranks, vec![5, 94, 98, 100, 102, 200, 202, 300]);
    }

    #[test]
    fn test_split_conditions_respects_parens() {
        let parts = split_conditions("chunk(A,left,np), inx(A,center:x,1,great)");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "chunk(A,left,np)");
        assert_eq!(parts[1], "inx(A,center:x,1,great)");
    }
}
