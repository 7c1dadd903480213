/// An inert straight link. Joints hang off either end of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    length: f32,
}

impl Body {
    /// Negative or non-finite lengths collapse to a zero-length body.
    pub fn new(length: f32) -> Self {
        if length.is_finite() && length >= 0.0 {
            return Self { length };
        }
        log::warn!("body length {} is not a non-negative number, using 0", length);
        Self { length: 0.0 }
    }

    pub fn length(&self) -> f32 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_lengths_collapse_to_zero() {
        assert_eq!(Body::new(1.5).length(), 1.5);
        assert_eq!(Body::new(0.0).length(), 0.0);
        for length in [-1.0, f32::NAN, f32::INFINITY] {
            assert_eq!(Body::new(length).length(), 0.0, "{length}");
        }
    }
}
