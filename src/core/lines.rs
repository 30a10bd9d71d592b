//! Raw line splitting that keeps the original terminators.
//! `\n`, `\r\n` and a lone `\r` all end a line; nothing is translated.
use crate::types::LineEnding;

/// One line of the input: content bytes plus the terminator that ended it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub body: &'a [u8],
    pub ending: LineEnding,
}

impl<'a> RawLine<'a> {
    /// Encoded length including the original terminator.
    pub fn encoded_len(&self) -> usize {
        self.body.len() + self.ending.as_bytes().len()
    }
}

/// Iterator over the raw lines of a byte buffer.
pub struct RawLines<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for RawLines<'a> {
    type Item = RawLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let data = self.rest;
        match data.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) if data[i] == b'\n' => {
                self.rest = &data[i + 1..];
                Some(RawLine {
                    body: &data[..i],
                    ending: LineEnding::Lf,
                })
            }
            Some(i) if data.get(i + 1) == Some(&b'\n') => {
                self.rest = &data[i + 2..];
                Some(RawLine {
                    body: &data[..i],
                    ending: LineEnding::CrLf,
                })
            }
            Some(i) => {
                self.rest = &data[i + 1..];
                Some(RawLine {
                    body: &data[..i],
                    ending: LineEnding::Cr,
                })
            }
            None => {
                self.rest = &[];
                Some(RawLine {
                    body: data,
                    ending: LineEnding::None,
                })
            }
        }
    }
}

pub fn raw_lines(data: &[u8]) -> RawLines<'_> {
    RawLines { rest: data }
}
