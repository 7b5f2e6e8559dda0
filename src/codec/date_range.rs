//! Fixed-width binary encoding for [`DateRange`].
//!
//! # Format
//!
//! A date range is encoded as:
//! - 1 byte range tag (see below)
//! - for each bounded side, lower first:
//!   - 1 byte precision (`YEAR = 0` .. `MILLISECOND = 6`)
//!   - 8 bytes milliseconds since epoch (big-endian i64)
//!
//! | tag | shape | bytes |
//! |-----|-------|-------|
//! | `0x00` | single instant | 10 |
//! | `0x01` | closed interval | 19 |
//! | `0x02` | open end (`[x TO *]`) | 10 |
//! | `0x03` | open start (`[* TO x]`) | 10 |
//! | `0x04` | both sides open (`[* TO *]`) | 1 |
//! | `0x05` | single open instant (`*`) | 1 |

use crate::model::{DateRange, DateRangeBound, DateRangePrecision};
use crate::{Error, Result};

pub const TAG_SINGLE_DATE: u8 = 0x00;
pub const TAG_CLOSED_RANGE: u8 = 0x01;
pub const TAG_OPEN_RANGE_HIGH: u8 = 0x02;
pub const TAG_OPEN_RANGE_LOW: u8 = 0x03;
pub const TAG_BOTH_OPEN_RANGE: u8 = 0x04;
pub const TAG_SINGLE_DATE_OPEN: u8 = 0x05;

const BOUND_LEN: usize = 9;

/// Encode a date range as a bound parameter value.
pub fn encode_date_range(range: &DateRange) -> Vec<u8> {
    use DateRangeBound::{Bounded, Unbounded};

    let (tag, bounds): (u8, [Option<&DateRangeBound>; 2]) = match (&range.lower, &range.upper) {
        (lower @ Bounded { .. }, None) => (TAG_SINGLE_DATE, [Some(lower), None]),
        (Unbounded, None) => (TAG_SINGLE_DATE_OPEN, [None, None]),
        (lower @ Bounded { .. }, Some(upper @ Bounded { .. })) => {
            (TAG_CLOSED_RANGE, [Some(lower), Some(upper)])
        }
        (lower @ Bounded { .. }, Some(Unbounded)) => (TAG_OPEN_RANGE_HIGH, [Some(lower), None]),
        (Unbounded, Some(upper @ Bounded { .. })) => (TAG_OPEN_RANGE_LOW, [Some(upper), None]),
        (Unbounded, Some(Unbounded)) => (TAG_BOTH_OPEN_RANGE, [None, None]),
    };

    let mut buf = Vec::with_capacity(1 + 2 * BOUND_LEN);
    buf.push(tag);
    for bound in bounds.into_iter().flatten() {
        encode_bound(bound, &mut buf);
    }
    buf
}

fn encode_bound(bound: &DateRangeBound, buf: &mut Vec<u8>) {
    if let DateRangeBound::Bounded { time_ms, precision } = bound {
        buf.push(precision.as_byte());
        buf.extend_from_slice(&time_ms.to_be_bytes());
    }
}

/// Decode a date range; the exact inverse of [`encode_date_range`].
pub fn decode_date_range(bytes: &[u8]) -> Result<DateRange> {
    let (&tag, rest) = bytes
        .split_first()
        .ok_or_else(|| Error::Format("empty date range".to_owned()))?;

    let expected = match tag {
        TAG_SINGLE_DATE | TAG_OPEN_RANGE_HIGH | TAG_OPEN_RANGE_LOW => BOUND_LEN,
        TAG_CLOSED_RANGE => 2 * BOUND_LEN,
        TAG_BOTH_OPEN_RANGE | TAG_SINGLE_DATE_OPEN => 0,
        other => return Err(Error::Format(format!("unknown date range tag 0x{other:02x}"))),
    };
    if rest.len() != expected {
        return Err(Error::Format(format!(
            "date range tag 0x{tag:02x} expects {} bytes, got {}",
            expected + 1,
            bytes.len()
        )));
    }

    let range = match tag {
        TAG_SINGLE_DATE => DateRange::single(decode_bound(rest)?),
        TAG_CLOSED_RANGE => {
            DateRange::between(decode_bound(&rest[..BOUND_LEN])?, decode_bound(&rest[BOUND_LEN..])?)
        }
        TAG_OPEN_RANGE_HIGH => DateRange::between(decode_bound(rest)?, DateRangeBound::Unbounded),
        TAG_OPEN_RANGE_LOW => DateRange::between(DateRangeBound::Unbounded, decode_bound(rest)?),
        TAG_BOTH_OPEN_RANGE => DateRange::between(DateRangeBound::Unbounded, DateRangeBound::Unbounded),
        _ => DateRange::single(DateRangeBound::Unbounded),
    };
    Ok(range)
}

fn decode_bound(bytes: &[u8]) -> Result<DateRangeBound> {
    let precision = DateRangePrecision::from_byte(bytes[0])
        .ok_or_else(|| Error::Format(format!("unknown date range precision {}", bytes[0])))?;
    let time_bytes: [u8; 8] = bytes[1..BOUND_LEN]
        .try_into()
        .map_err(|_| Error::Format("failed to read date range bound".to_owned()))?;
    Ok(DateRangeBound::new(i64::from_be_bytes(time_bytes), precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOW: i64 = 1_483_228_800_000; // 2017-01-01T00:00:00Z
    const HIGH: i64 = 1_514_764_799_999;

    #[test]
    fn test_closed_range_layout() {
        let range = DateRange::between(
            DateRangeBound::new(LOW, DateRangePrecision::Year),
            DateRangeBound::new(HIGH, DateRangePrecision::Millisecond),
        );
        let bytes = encode_date_range(&range);
        assert_eq!(bytes.len(), 19);
        assert_eq!(bytes[0], TAG_CLOSED_RANGE);
        assert_eq!(bytes[1], 0);
        assert_eq!(&bytes[2..10], &LOW.to_be_bytes());
        assert_eq!(bytes[10], 6);
        assert_eq!(&bytes[11..19], &HIGH.to_be_bytes());
    }

    #[test]
    fn test_precision_precedes_timestamp() {
        let bytes = encode_date_range(&DateRange::single(DateRangeBound::new(LOW, DateRangePrecision::Day)));
        assert_eq!(bytes, vec![0x00, 0x02, 0x00, 0x00, 0x01, 0x59, 0x57, 0x53, 0x64, 0x00]);
    }

    #[test]
    fn test_every_shape_and_precision_round_trips() {
        let open = DateRangeBound::Unbounded;
        for precision in DateRangePrecision::ALL {
            let low = DateRangeBound::new(LOW, precision);
            let high = DateRangeBound::new(HIGH, precision);
            let shapes = [
                (DateRange::single(low), TAG_SINGLE_DATE, 10),
                (DateRange::between(open, high), TAG_OPEN_RANGE_LOW, 10),
                (DateRange::between(low, open), TAG_OPEN_RANGE_HIGH, 10),
                (DateRange::between(low, high), TAG_CLOSED_RANGE, 19),
            ];
            for (range, tag, len) in shapes {
                let bytes = encode_date_range(&range);
                assert_eq!(bytes[0], tag);
                assert_eq!(bytes.len(), len);
                assert_eq!(decode_date_range(&bytes).unwrap(), range);
            }
        }
    }

    #[test]
    fn test_fully_open_shapes() {
        let both = DateRange::between(DateRangeBound::Unbounded, DateRangeBound::Unbounded);
        assert_eq!(encode_date_range(&both), vec![TAG_BOTH_OPEN_RANGE]);
        assert_eq!(decode_date_range(&[TAG_BOTH_OPEN_RANGE]).unwrap(), both);

        let star = DateRange::single(DateRangeBound::Unbounded);
        assert_eq!(encode_date_range(&star), vec![TAG_SINGLE_DATE_OPEN]);
        assert_eq!(decode_date_range(&[TAG_SINGLE_DATE_OPEN]).unwrap(), star);
    }

    #[test]
    fn test_invalid_tag_is_format_error() {
        let mut bytes = encode_date_range(&DateRange::single(DateRangeBound::new(LOW, DateRangePrecision::Day)));
        bytes[0] = 0x09;
        assert!(matches!(decode_date_range(&bytes), Err(Error::Format(_))));
    }

    #[test]
    fn test_wrong_length_is_format_error() {
        let bytes = encode_date_range(&DateRange::single(DateRangeBound::new(LOW, DateRangePrecision::Day)));
        assert!(matches!(decode_date_range(&bytes[..9]), Err(Error::Format(_))));
        let mut long = bytes.clone();
        long.push(0);
        assert!(matches!(decode_date_range(&long), Err(Error::Format(_))));
        assert!(matches!(decode_date_range(&[TAG_BOTH_OPEN_RANGE, 0]), Err(Error::Format(_))));
        assert!(matches!(decode_date_range(&[]), Err(Error::Format(_))));
    }

    #[test]
    fn test_unknown_precision_is_format_error() {
        let mut bytes = encode_date_range(&DateRange::single(DateRangeBound::new(LOW, DateRangePrecision::Day)));
        bytes[1] = 0x7f;
        assert!(matches!(decode_date_range(&bytes), Err(Error::Format(_))));
    }
}
