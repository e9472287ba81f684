use super::{ChessField, Move};

pub fn assert_moves<I: Iterator<Item = Move>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.map(|m| m.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}

/// Order-insensitive comparison of generated destinations against `(row, col)` pairs.
pub fn assert_fields(mut generated: Vec<ChessField>, expected: &[(u8, u8)]) {
    let mut expected: Vec<ChessField> = expected.iter().map(|&field| field.into()).collect();
    generated.sort();
    expected.sort();

    assert_eq!(generated, expected);
}
