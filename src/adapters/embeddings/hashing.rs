//! Deterministic offline embedder.
//!
//! Hashes lowercase word tokens into a fixed number of buckets (signed
//! feature hashing) and L2-normalises the result. Texts sharing words land
//! close together, which is enough to exercise retrieval without a model
//! server.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::ports::EmbeddingProvider;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Feature-hashing embedder with no external dependencies
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Create an embedder producing `dimension`-wide vectors
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Embed one text. Same text always yields the same unit vector.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimension];
        if self.dimension == 0 {
            return embedding;
        }

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = fnv1a(&token.to_lowercase());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        // Use f64 for the magnitude to avoid accumulation error over many buckets
        let magnitude = embedding
            .iter()
            .map(|x| f64::from(*x) * f64::from(*x))
            .sum::<f64>()
            .sqrt();

        if magnitude > 1e-10 {
            for val in &mut embedding {
                *val = (f64::from(*val) / magnitude) as f32;
            }
        } else {
            // No tokens: fall back to a uniform unit vector
            let uniform = 1.0 / (self.dimension as f32).sqrt();
            embedding.fill(uniform);
        }

        embedding
    }
}

fn fnv1a(token: &str) -> u64 {
    token.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    fn name(&self) -> &'static str {
        "hashing"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::vector::flat_l2::squared_l2;

    #[test]
    fn test_deterministic_and_normalized() {
        let embedder = HashingEmbedder::new(64);
        let a = embedder.embed_text("Retrieval augmented generation");
        let b = embedder.embed_text("Retrieval augmented generation");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let magnitude: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let embedder = HashingEmbedder::new(64);
        assert_eq!(
            embedder.embed_text("Vector, Index!"),
            embedder.embed_text("vector index")
        );
    }

    #[test]
    fn test_shared_words_are_closer() {
        let embedder = HashingEmbedder::new(256);
        let query = embedder.embed_text("photosynthesis in plants");
        let related = embedder.embed_text("plants perform photosynthesis using light");
        let unrelated = embedder.embed_text("the stock market closed lower today");
        assert!(squared_l2(&query, &related) < squared_l2(&query, &unrelated));
    }

    #[test]
    fn test_empty_text_is_uniform_unit_vector() {
        let embedder = HashingEmbedder::new(4);
        assert_eq!(embedder.embed_text("  "), vec![0.5; 4]);
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_order() {
        let embedder = HashingEmbedder::new(32);
        let texts = vec!["alpha".to_string(), "beta".to_string()];
        let vectors = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(vectors[0], embedder.embed_text("alpha"));
        assert_eq!(vectors[1], embedder.embed_text("beta"));
        assert_eq!(embedder.embed("beta").await.unwrap(), vectors[1]);
    }
}
