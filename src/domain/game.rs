use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// Result of one dice round: "Tài" (big) or "Xỉu" (small).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Tai,
    Xiu,
}

impl Outcome {
    pub fn opposite(self) -> Self {
        match self {
            Outcome::Tai => Outcome::Xiu,
            Outcome::Xiu => Outcome::Tai,
        }
    }

    /// Lowercase ASCII token used in API responses and history entries.
    pub fn canonical(self) -> &'static str {
        match self {
            Outcome::Tai => "tai",
            Outcome::Xiu => "xiu",
        }
    }

    /// Upstream display form, with diacritics.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Tai => "Tài",
            Outcome::Xiu => "Xỉu",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Outcome {
    type Err = String;

    /// Accepts any casing and the accented or bare spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .flat_map(char::to_lowercase)
            .filter_map(fold_vietnamese_vowel)
            .collect();

        match folded.as_str() {
            "tai" => Ok(Outcome::Tai),
            "xiu" => Ok(Outcome::Xiu),
            _ => Err(format!("Unknown outcome label: {s:?}")),
        }
    }
}

// Strips tone marks from the vowels that appear in the two labels and
// drops standalone combining marks (decomposed input).
fn fold_vietnamese_vowel(c: char) -> Option<char> {
    match c {
        '\u{0300}'..='\u{036f}' => None,
        'à' | 'á' | 'ả' | 'ã' | 'ạ' => Some('a'),
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => Some('i'),
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' => Some('u'),
        other => Some(other),
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One historical round as published by the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(rename = "Phien")]
    pub round: i64,
    #[serde(rename = "Ket_qua")]
    pub result: Outcome,
    #[serde(rename = "Xuc_xac_1")]
    pub die_1: u8,
    #[serde(rename = "Xuc_xac_2")]
    pub die_2: u8,
    #[serde(rename = "Xuc_xac_3")]
    pub die_3: u8,
    #[serde(rename = "Tong")]
    pub sum: u32,
}

impl OutcomeRecord {
    pub fn dice(&self) -> [u8; 3] {
        [self.die_1, self.die_2, self.die_3]
    }

    fn to_value(&self) -> Value {
        json!({
            "Phien": self.round,
            "Ket_qua": self.result.label(),
            "Xuc_xac_1": self.die_1,
            "Xuc_xac_2": self.die_2,
            "Xuc_xac_3": self.die_3,
            "Tong": self.sum,
        })
    }
}

/// The two independent upstream streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Hu,
    Md5,
}

impl FeedType {
    /// URL segment and history key.
    pub fn slug(self) -> &'static str {
        match self {
            FeedType::Hu => "hu",
            FeedType::Md5 => "md5",
        }
    }

    /// Human readable name shown in history dumps.
    pub fn title(self) -> &'static str {
        match self {
            FeedType::Hu => "Tài Xỉu Hũ",
            FeedType::Md5 => "Tài Xỉu MD5",
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Upstream document: one most-recent-first array per feed type.
///
/// Arrays stay undecoded until a feed asks for them, so a malformed record
/// only fails the endpoints of its own feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSnapshot {
    #[serde(default)]
    taixiu: Option<Value>,
    #[serde(default)]
    taixiumd5: Option<Value>,
}

impl FeedSnapshot {
    pub fn from_records(hu: Option<Vec<OutcomeRecord>>, md5: Option<Vec<OutcomeRecord>>) -> Self {
        Self {
            taixiu: hu.map(encode_records),
            taixiumd5: md5.map(encode_records),
        }
    }

    fn raw(&self, feed: FeedType) -> Option<&Value> {
        match feed {
            FeedType::Hu => self.taixiu.as_ref(),
            FeedType::Md5 => self.taixiumd5.as_ref(),
        }
    }

    /// Decoded records for a feed, empty when the array is missing or null.
    pub fn records(&self, feed: FeedType) -> Result<Vec<OutcomeRecord>, serde_json::Error> {
        match self.raw(feed) {
            Some(raw) => Vec::<OutcomeRecord>::deserialize(raw),
            None => Ok(Vec::new()),
        }
    }

    /// Number of array elements published for a feed, decoded or not.
    pub fn published_len(&self, feed: FeedType) -> usize {
        self.raw(feed).and_then(Value::as_array).map_or(0, Vec::len)
    }
}

fn encode_records(records: Vec<OutcomeRecord>) -> Value {
    Value::Array(records.iter().map(OutcomeRecord::to_value).collect())
}
