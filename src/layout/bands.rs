/// One child's span along the banding axis, as offsets from the parent's start edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: i32,
    pub end: i32,
    /// Ideal (unrounded) length of the band.
    pub proportion: f64,
}

impl Band {
    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Running accumulator that cuts a parent's band length into consecutive bands.
///
/// Both edges of every band come from rounding the absolute accumulated
/// position, so each band's length is `round(cum_i) - round(cum_{i-1})` and
/// the bands tile `[0, band_len]` exactly once the weights are exhausted.
#[derive(Debug, Clone)]
pub struct BandCursor {
    parent_weight: f64,
    band_len: i32,
    consumed_weight: f64,
}

impl BandCursor {
    pub fn new(parent_weight: f64, band_len: i32) -> Self {
        Self {
            parent_weight,
            band_len: band_len.max(0),
            consumed_weight: 0.0,
        }
    }

    /// Cut the next band for a child of the given weight.
    pub fn next_band(&mut self, weight: f64) -> Band {
        let proportion = self.scale(weight);
        let start = self.offset(self.consumed_weight);
        self.consumed_weight += weight;
        let end = self.offset(self.consumed_weight).max(start);
        Band {
            start,
            end,
            proportion,
        }
    }

    /// Length along the band for `weight`. A weightless parent gives every child 0.
    fn scale(&self, weight: f64) -> f64 {
        if self.parent_weight > 0.0 {
            (weight / self.parent_weight) * self.band_len as f64
        } else {
            0.0
        }
    }

    fn offset(&self, consumed_weight: f64) -> i32 {
        round_half_up(self.scale(consumed_weight)).clamp(0, self.band_len)
    }
}

/// `floor(x + 0.5)`, saturating at the `i32` range.
pub fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}
