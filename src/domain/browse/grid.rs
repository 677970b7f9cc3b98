use serde::{Deserialize, Serialize};

const FIBONACCI_INDICES: [usize; 12] = [0, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];

/// Colour tag of a grid cell, derived from the cell's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridColor {
    Prime,
    Fibonacci,
    Even,
    Odd,
}

impl GridColor {
    /// Prime wins over Fibonacci, which wins over parity
    pub fn for_index(index: usize) -> Self {
        if is_prime(index) {
            GridColor::Prime
        } else if FIBONACCI_INDICES.contains(&index) {
            GridColor::Fibonacci
        } else if index % 2 == 0 {
            GridColor::Even
        } else {
            GridColor::Odd
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            GridColor::Prime => "bg-red-500",
            GridColor::Fibonacci => "bg-orange-500",
            GridColor::Even => "bg-green-500",
            GridColor::Odd => "bg-yellow-500",
        }
    }
}

fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    (2..).take_while(|i| i * i <= n).all(|i| n % i != 0)
}
