//! Static prize table and slice geometry
//!
//! The wheel is partitioned into equal angular slices, one per prize, in
//! array order starting at 0 degrees.

use crate::slice_angle;

/// A prize on the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prize {
    /// Short label shown on the wheel slice
    pub label: &'static str,
    /// Longer description shown on the result card
    pub description: &'static str,
    /// CSS color of the slice
    pub color: &'static str,
}

/// The fixed prize sequence. Slice `i` spans
/// `[i * 60, (i + 1) * 60)` degrees.
pub const PRIZES: [Prize; 6] = [
    Prize {
        label: "\u{1F367} Açaí",
        description: "Um açaí caprichado com tudo que você ama: leite em pó, morango e muito carinho.",
        color: "#FF8EB0",
    },
    Prize {
        label: "\u{1F363} Sushi",
        description: "Um jantar japonês delicioso para curtirmos juntinhos e brindar nosso amor.",
        color: "#B897FF",
    },
    Prize {
        label: "\u{1F354} Lanche",
        description: "Aquele lanche perfeito, com refri e sobremesa para uma noite divertida.",
        color: "#73D7FF",
    },
    Prize {
        label: "\u{1F36B} Chocolate",
        description: "Uma seleção especial de chocolates para adoçar ainda mais seu dia.",
        color: "#FFD77A",
    },
    Prize {
        label: "\u{1F381} Presente surpresa",
        description: "Uma surpresa pensada com amor — do jeitinho que você merece.",
        color: "#7EF2C2",
    },
    Prize {
        label: "\u{1F496} Você escolhe",
        description: "Hoje quem manda é você! Escolha o presente e eu realizo com alegria.",
        color: "#FFA7F6",
    },
];

/// Start angle of slice `index` in the wheel's un-rotated frame (degrees)
#[inline]
pub fn slice_start(index: usize) -> f64 {
    index as f64 * slice_angle(PRIZES.len())
}

/// CSS `conic-gradient` stop list for the wheel face
///
/// Each prize contributes a hard stop spanning its slice, producing the
/// pie-chart look the labels are laid out against.
pub fn gradient_stops() -> String {
    let angle = slice_angle(PRIZES.len());
    PRIZES
        .iter()
        .enumerate()
        .map(|(i, prize)| {
            format!(
                "{} {}deg {}deg",
                prize.color,
                i as f64 * angle,
                (i + 1) as f64 * angle
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
