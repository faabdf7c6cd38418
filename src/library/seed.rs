use super::Proof;

const INFINITY_OF_PRIMES: &str = r"
## Theorem
There are infinitely many prime numbers.

## Proof
Suppose that there are only a finite number of primes $p_1, p_2, \dots, p_n$.
Consider the integer
$$ N = p_1 p_2 \dots p_n + 1 $$
Since $N > 1$, by the fundamental theorem of arithmetic, $N$ has at least one prime factor $q$.
If $q$ were one of the primes $p_i$, then $q$ would divide $N - p_1 p_2 \dots p_n = 1$, which is impossible.
Therefore, $q$ is a prime distinct from all $p_i$, contradicting the assumption that we have listed all primes.
$\blacksquare$
    ";

const EULERS_IDENTITY: &str = r"
## Statement
$$ e^{i\pi} + 1 = 0 $$

## Derivation
Recall Euler's formula for any real number $x$:
$$ e^{ix} = \cos(x) + i\sin(x) $$
Substituting $x = \pi$:
$$ e^{i\pi} = \cos(\pi) + i\sin(\pi) $$
Since $\cos(\pi) = -1$ and $\sin(\pi) = 0$, we have:
$$ e^{i\pi} = -1 $$
$$ e^{i\pi} + 1 = 0 $$
$\blacksquare$
    ";

/// The two example proofs a fresh library starts with.
pub fn initial_proofs(now_ms: i64) -> Vec<Proof> {
    vec![
        Proof {
            id: "1".to_string(),
            title: "The Infinity of Primes".to_string(),
            summary: "A classic proof by Euclid demonstrating that there are infinitely many \
                      prime numbers."
                .to_string(),
            content: INFINITY_OF_PRIMES.to_string(),
            author: "Euclid".to_string(),
            tags: vec!["Number Theory".to_string(), "Classics".to_string()],
            created_at: now_ms - 10_000_000,
        },
        Proof {
            id: "2".to_string(),
            title: "Euler's Identity".to_string(),
            summary: "The most beautiful equation in mathematics, connecting five fundamental \
                      constants."
                .to_string(),
            content: EULERS_IDENTITY.to_string(),
            author: "Leonhard Euler".to_string(),
            tags: vec!["Analysis".to_string(), "Complex Numbers".to_string()],
            created_at: now_ms,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{self, Segment, Typesetter, UnicodeTypesetter};

    #[test]
    fn test_seed_content_typesets_cleanly() {
        for proof in initial_proofs(0) {
            let segments = markup::render(&proof.content);
            assert!(segments.iter().any(|s| matches!(s, Segment::Heading(_))));
            for segment in &segments {
                match segment {
                    Segment::InlineMath(expr) => {
                        UnicodeTypesetter.typeset(expr, markup::MathMode::Inline).unwrap();
                    }
                    Segment::BlockMath(expr) => {
                        UnicodeTypesetter.typeset(expr, markup::MathMode::Block).unwrap();
                    }
                    _ => {}
                }
            }
        }
    }
}
