//! 徽标的几何图元与图层定义

/// 纯色 RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_f32(self) -> [f32; 3] {
        [self.0 as f32, self.1 as f32, self.2 as f32]
    }
}

/// 图元类型；比例均相对于画布边长，像素值为小尺寸下的下限/内缩
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Disc {
        radius: f32,
    },
    Ring {
        inner: f32,
        outer: f32,
        /// 外半径向内收缩的像素数
        outer_inset: f32,
        /// 环的最小像素宽度
        min_width: f32,
    },
    Point {
        radius: f32,
        /// 最小像素半径
        min_radius: f32,
    },
}

/// 命名图元：中心 + 尺寸 + 颜色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub name: &'static str,
    pub kind: ShapeKind,
    pub center: (f32, f32),
    pub color: Rgb,
}

impl Shape {
    /// 按画布边长换算成像素坐标
    pub fn resolve(&self, size: u32) -> Footprint {
        let n = size as f32;
        let cx = self.center.0 * n;
        let cy = self.center.1 * n;

        match self.kind {
            ShapeKind::Disc { radius } => Footprint::disc(cx, cy, radius * n),
            ShapeKind::Point { radius, min_radius } => {
                Footprint::disc(cx, cy, (radius * n).max(min_radius))
            }
            ShapeKind::Ring {
                inner,
                outer,
                outer_inset,
                min_width,
            } => {
                let outer = outer * n - outer_inset;
                let inner = (inner * n).min(outer - min_width);
                Footprint::ring(cx, cy, inner, outer)
            }
        }
    }
}

/// 换算到像素单位后的包含测试
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Footprint {
    /// 几何退化，任何位置覆盖率都为 0
    Empty,
    Disc { cx: f32, cy: f32, radius: f32 },
    Ring { cx: f32, cy: f32, inner: f32, outer: f32 },
}

impl Footprint {
    fn disc(cx: f32, cy: f32, radius: f32) -> Self {
        if radius > 0.0 {
            Footprint::Disc { cx, cy, radius }
        } else {
            Footprint::Empty
        }
    }

    fn ring(cx: f32, cy: f32, inner: f32, outer: f32) -> Self {
        if inner >= 0.0 && inner < outer {
            Footprint::Ring {
                cx,
                cy,
                inner,
                outer,
            }
        } else {
            Footprint::Empty
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Footprint::Empty)
    }

    /// 采样点 (x, y) 是否落在图元内
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match *self {
            Footprint::Empty => false,
            Footprint::Disc { cx, cy, radius } => distance(x, y, cx, cy) <= radius,
            Footprint::Ring {
                cx,
                cy,
                inner,
                outer,
            } => {
                let d = distance(x, y, cx, cy);
                inner <= d && d <= outer
            }
        }
    }
}

#[inline]
fn distance(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    let dx = x - cx;
    let dy = y - cy;
    (dx * dx + dy * dy).sqrt()
}

pub const LAYER_COUNT: usize = 4;

/// 合成顺序：背景圆盘、边框环、"O" 环、卫星点。背景必须在第一位。
pub const BADGE_LAYERS: [Shape; LAYER_COUNT] = [
    Shape {
        name: "background",
        kind: ShapeKind::Disc { radius: 0.47 },
        center: (0.5, 0.5),
        color: Rgb(17, 24, 39),
    },
    Shape {
        name: "border",
        kind: ShapeKind::Ring {
            inner: 0.42,
            outer: 0.47,
            outer_inset: 0.0,
            min_width: 1.2,
        },
        center: (0.5, 0.5),
        color: Rgb(56, 189, 248),
    },
    Shape {
        name: "orbit",
        kind: ShapeKind::Ring {
            inner: 0.14,
            outer: 0.26,
            outer_inset: 0.5,
            min_width: 0.0,
        },
        center: (0.40, 0.40),
        color: Rgb(250, 250, 250),
    },
    Shape {
        name: "satellite",
        kind: ShapeKind::Point {
            radius: 0.07,
            min_radius: 1.2,
        },
        center: (0.71, 0.71),
        color: Rgb(251, 191, 36),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_width_floor() {
        // 16px: 0.05 * 16 = 0.8 < 1.2，使用下限
        match BADGE_LAYERS[1].resolve(16) {
            Footprint::Ring { inner, outer, .. } => {
                assert!((outer - 7.52).abs() < 1e-4);
                assert!((outer - inner - 1.2).abs() < 1e-4);
            }
            other => panic!("unexpected footprint: {:?}", other),
        }

        // 128px: 比例宽度大于下限
        match BADGE_LAYERS[1].resolve(128) {
            Footprint::Ring { inner, outer, .. } => {
                assert!((outer - inner - 6.4).abs() < 1e-3);
            }
            other => panic!("unexpected footprint: {:?}", other),
        }
    }

    #[test]
    fn test_point_radius_floor() {
        match BADGE_LAYERS[3].resolve(16) {
            Footprint::Disc { radius, .. } => assert_eq!(radius, 1.2),
            other => panic!("unexpected footprint: {:?}", other),
        }
        match BADGE_LAYERS[3].resolve(100) {
            Footprint::Disc { radius, .. } => assert!((radius - 7.0).abs() < 1e-4),
            other => panic!("unexpected footprint: {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_rings() {
        for n in 1..=4 {
            assert!(BADGE_LAYERS[2].resolve(n).is_empty(), "orbit at {}", n);
        }
        assert!(!BADGE_LAYERS[2].resolve(5).is_empty());

        assert!(BADGE_LAYERS[1].resolve(1).is_empty());
        assert!(BADGE_LAYERS[1].resolve(2).is_empty());
        assert!(!BADGE_LAYERS[1].resolve(3).is_empty());
    }

    #[test]
    fn test_contains() {
        let ring = Footprint::Ring {
            cx: 0.0,
            cy: 0.0,
            inner: 1.0,
            outer: 2.0,
        };
        assert!(!ring.contains(0.5, 0.0));
        assert!(ring.contains(1.0, 0.0));
        assert!(ring.contains(0.0, 2.0));
        assert!(!ring.contains(2.0, 2.0));
        assert!(!Footprint::Empty.contains(0.0, 0.0));
    }
}
