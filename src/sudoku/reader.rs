use super::Placement;
use crate::errors::ParseError;
use crate::matrix::ConstraintKind;

// givens and the candidates to remove before solving
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Parsed {
    pub(crate) givens: Vec<Placement>,
    pub(crate) eliminations: Vec<String>,
}

// Either one line of 81 cells or nine lines of 9. Every non-empty line after the
// grid lists candidates to eliminate, separated by whitespace.
pub(crate) fn read(text: &str) -> Result<Parsed, ParseError> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty());

    let mut rows = vec![];
    match lines.next() {
        Some(line) if line.chars().count() == 81 => {
            let cells = line.chars().collect::<Vec<_>>();
            rows.extend(cells.chunks(9).map(<[char]>::to_vec));
        }
        Some(first) => {
            rows.push(first.chars().collect::<Vec<_>>());
            for row in 1..9u8 {
                match lines.next() {
                    Some(line) => rows.push(line.chars().collect()),
                    None => return Err(ParseError::NotEnoughRows(row)),
                }
            }
        }
        None => return Err(ParseError::NotEnoughRows(0)),
    }

    let mut parsed = Parsed::default();
    let mut seen = Houses::default();
    for (row, cells) in rows.iter().enumerate() {
        let row = row as u8;
        if cells.len() != 9 {
            return Err(ParseError::InvalidLineLength {
                row,
                len: cells.len(),
            });
        }
        for (col, &ch) in cells.iter().enumerate() {
            let col = col as u8;
            let digit = match ch {
                '.' => continue,
                '1'..='9' => ch as u8 - b'0',
                _ => return Err(ParseError::InvalidEntry { row, col, ch }),
            };
            let placement = Placement { row, col, digit };
            seen.insert(placement)?;
            parsed.givens.push(placement);
        }
    }

    parsed.eliminations = lines
        .flat_map(str::split_whitespace)
        .map(str::to_owned)
        .collect();
    Ok(parsed)
}

// digits given so far in every row, column and box
#[derive(Default)]
struct Houses {
    rows: [[bool; 10]; 9],
    cols: [[bool; 10]; 9],
    boxes: [[bool; 10]; 9],
}

impl Houses {
    fn insert(&mut self, placement: Placement) -> Result<(), ParseError> {
        let Placement { row, col, digit } = placement;
        let houses = [
            (ConstraintKind::Row, row, &mut self.rows),
            (ConstraintKind::Column, col, &mut self.cols),
            (ConstraintKind::Box, placement.box_index(), &mut self.boxes),
        ];
        for (kind, index, house) in houses {
            let slot = &mut house[index as usize][digit as usize];
            if *slot {
                return Err(ParseError::DuplicateDigit { kind, index, digit });
            }
            *slot = true;
        }
        Ok(())
    }
}
