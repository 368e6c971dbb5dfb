use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed palette of decorative gradient descriptors used when a stack
/// is created without an explicit cover.
pub const GRADIENT_PALETTE: [&str; 8] = [
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #30cfd0 0%, #330867 100%)",
    "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
    "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)",
];

/// Cover of a stack: an image reference or a decorative gradient.
///
/// There is deliberately no "absent" variant; a stack always carries a
/// cover, synthesized at creation time when the caller gives none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cover {
    Image(String),
    Gradient(String),
}

impl Cover {
    pub fn image(reference: impl Into<String>) -> Self {
        Cover::Image(reference.into())
    }

    pub fn gradient(descriptor: impl Into<String>) -> Self {
        Cover::Gradient(descriptor.into())
    }

    /// Pick a gradient uniformly from the fixed palette.
    pub fn random_gradient() -> Self {
        let idx = rand::thread_rng().gen_range(0..GRADIENT_PALETTE.len());
        Cover::Gradient(GRADIENT_PALETTE[idx].to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Cover::Image(s) => s,
            Cover::Gradient(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_gradient_from_palette() {
        for _ in 0..32 {
            let cover = Cover::random_gradient();
            match &cover {
                Cover::Gradient(g) => assert!(GRADIENT_PALETTE.contains(&g.as_str())),
                other => panic!("expected gradient, got {:?}", other),
            }
            assert!(!cover.as_str().is_empty());
        }
    }

    #[test]
    fn test_cover_json_round_trip() {
        let cover = Cover::image("https://example.com/a.png");
        let json = serde_json::to_string(&cover).unwrap();
        let back: Cover = serde_json::from_str(&json).unwrap();
        assert_eq!(cover, back);
    }
}
