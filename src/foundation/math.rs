/// Closed numeric interval over the finite values of a column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Extent of the finite values; `None` when there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut out: Option<Self> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            out = Some(match out {
                None => Self { min: v, max: v },
                Some(e) => Self {
                    min: e.min.min(v),
                    max: e.max.max(v),
                },
            });
        }
        out
    }

    /// Unit span centered on zero.
    pub fn unit() -> Self {
        Self {
            min: -0.5,
            max: 0.5,
        }
    }

    pub fn span(self) -> f64 {
        self.max - self.min
    }

    pub fn center(self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Zero-width extents become a unit span around their center.
    pub fn widened(self) -> Self {
        if self.span() > f64::EPSILON {
            return self;
        }
        let c = self.center();
        Self {
            min: c - 0.5,
            max: c + 0.5,
        }
    }
}
