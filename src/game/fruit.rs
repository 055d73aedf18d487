use crate::consts;
use crate::geometry::Coord;

/// The single fruit that can be on the board at a time
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Fruit {
    pub(crate) pos: Coord,

    /// Special fruits are worth more and vanish after a while
    pub(crate) special: bool,

    /// Manhattan distance from the snake's head when the fruit was placed
    pub(crate) distance: u32,

    /// Number of steps the snake has taken since the fruit was placed
    pub(crate) steps: u32,
}

impl Fruit {
    pub(crate) fn new(pos: Coord, special: bool, distance: u32) -> Fruit {
        Fruit {
            pos,
            special,
            distance,
            steps: 0,
        }
    }

    /// A special fruit expires once it has gone uneaten for more than its
    /// spawn distance plus a grace period.  Ordinary fruits never expire.
    pub(crate) fn expired(&self) -> bool {
        self.special
            && self.steps > self.distance.saturating_add(consts::SPECIAL_FRUIT_GRACE)
    }

    /// Points awarded for eating the fruit now.  Reaching it by the shortest
    /// route earns the full base amount; every wasted step reduces it.
    pub(crate) fn points(&self) -> u32 {
        let base = consts::FRUIT_POINTS.saturating_mul(self.distance) / self.steps.max(1);
        if self.special {
            base.saturating_mul(consts::SPECIAL_MULTIPLIER)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, 2, false, 10)]
    #[case(2, 2, true, 100)]
    #[case(2, 4, false, 5)]
    #[case(7, 9, false, 7)]
    #[case(7, 9, true, 70)]
    #[case(1, 30, false, 0)]
    fn points(#[case] distance: u32, #[case] steps: u32, #[case] special: bool, #[case] pts: u32) {
        let mut fruit = Fruit::new(Coord::new(0, 0), special, distance);
        fruit.steps = steps;
        assert_eq!(fruit.points(), pts);
    }

    #[rstest]
    #[case(true, 12, false)]
    #[case(true, 13, true)]
    #[case(false, 13, false)]
    #[case(false, 1000, false)]
    fn expired(#[case] special: bool, #[case] steps: u32, #[case] gone: bool) {
        let mut fruit = Fruit::new(Coord::new(0, 0), special, 2);
        fruit.steps = steps;
        assert_eq!(fruit.expired(), gone);
    }
}
