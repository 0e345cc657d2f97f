// ============================================================================
// Digit Buffer
// Bounded decimal digit string with exact base-2 shifting and rounding
// ============================================================================
//
// A DigitBuffer holds a non-negative decimal value as ASCII digits plus the
// position of the decimal point:
//
//     digits = "15625", decimal_point = 0   =>  0.15625
//     digits = "15625", decimal_point = 7   =>  1562500
//     digits = "15625", decimal_point = -2  =>  0.0015625
//
// Multiplying or dividing by a power of two only ever needs a machine-word
// accumulator, so the float converter can reconstruct mantissa * 2^exp
// exactly without big-integer arithmetic. Trailing zeros never survive an
// operation; the empty buffer is zero.
// ============================================================================

use arrayvec::ArrayVec;
use std::fmt;

/// Maximum number of digits a buffer can hold.
///
/// The exact expansion of the smallest subnormal double needs 767
/// significant digits, so every f64 fits without truncation.
pub const DIGIT_CAPACITY: usize = 800;

/// Largest shift done in a single pass: the accumulator must hold `9 << k`.
const MAX_SHIFT: u32 = u64::BITS - 4;

/// Left-shift lookup entry.
///
/// Shifting left by `k` bits adds `extra_digits` digits to the front of the
/// number, or one fewer when the current leading digits are lexicographically
/// below `threshold` (the digits of 5^k).
struct LeftShiftStep {
    extra_digits: usize,
    threshold: &'static [u8],
}

#[rustfmt::skip]
static LEFT_SHIFT_TABLE: [LeftShiftStep; MAX_SHIFT as usize + 1] = [
    LeftShiftStep { extra_digits: 0, threshold: b"" },
    LeftShiftStep { extra_digits: 1, threshold: b"5" },
    LeftShiftStep { extra_digits: 1, threshold: b"25" },
    LeftShiftStep { extra_digits: 1, threshold: b"125" },
    LeftShiftStep { extra_digits: 2, threshold: b"625" },
    LeftShiftStep { extra_digits: 2, threshold: b"3125" },
    LeftShiftStep { extra_digits: 2, threshold: b"15625" },
    LeftShiftStep { extra_digits: 3, threshold: b"78125" },
    LeftShiftStep { extra_digits: 3, threshold: b"390625" },
    LeftShiftStep { extra_digits: 3, threshold: b"1953125" },
    LeftShiftStep { extra_digits: 4, threshold: b"9765625" },
    LeftShiftStep { extra_digits: 4, threshold: b"48828125" },
    LeftShiftStep { extra_digits: 4, threshold: b"244140625" },
    LeftShiftStep { extra_digits: 4, threshold: b"1220703125" },
    LeftShiftStep { extra_digits: 5, threshold: b"6103515625" },
    LeftShiftStep { extra_digits: 5, threshold: b"30517578125" },
    LeftShiftStep { extra_digits: 5, threshold: b"152587890625" },
    LeftShiftStep { extra_digits: 6, threshold: b"762939453125" },
    LeftShiftStep { extra_digits: 6, threshold: b"3814697265625" },
    LeftShiftStep { extra_digits: 6, threshold: b"19073486328125" },
    LeftShiftStep { extra_digits: 7, threshold: b"95367431640625" },
    LeftShiftStep { extra_digits: 7, threshold: b"476837158203125" },
    LeftShiftStep { extra_digits: 7, threshold: b"2384185791015625" },
    LeftShiftStep { extra_digits: 7, threshold: b"11920928955078125" },
    LeftShiftStep { extra_digits: 8, threshold: b"59604644775390625" },
    LeftShiftStep { extra_digits: 8, threshold: b"298023223876953125" },
    LeftShiftStep { extra_digits: 8, threshold: b"1490116119384765625" },
    LeftShiftStep { extra_digits: 9, threshold: b"7450580596923828125" },
    LeftShiftStep { extra_digits: 9, threshold: b"37252902984619140625" },
    LeftShiftStep { extra_digits: 9, threshold: b"186264514923095703125" },
    LeftShiftStep { extra_digits: 10, threshold: b"931322574615478515625" },
    LeftShiftStep { extra_digits: 10, threshold: b"4656612873077392578125" },
    LeftShiftStep { extra_digits: 10, threshold: b"23283064365386962890625" },
    LeftShiftStep { extra_digits: 10, threshold: b"116415321826934814453125" },
    LeftShiftStep { extra_digits: 11, threshold: b"582076609134674072265625" },
    LeftShiftStep { extra_digits: 11, threshold: b"2910383045673370361328125" },
    LeftShiftStep { extra_digits: 11, threshold: b"14551915228366851806640625" },
    LeftShiftStep { extra_digits: 12, threshold: b"72759576141834259033203125" },
    LeftShiftStep { extra_digits: 12, threshold: b"363797880709171295166015625" },
    LeftShiftStep { extra_digits: 12, threshold: b"1818989403545856475830078125" },
    LeftShiftStep { extra_digits: 13, threshold: b"9094947017729282379150390625" },
    LeftShiftStep { extra_digits: 13, threshold: b"45474735088646411895751953125" },
    LeftShiftStep { extra_digits: 13, threshold: b"227373675443232059478759765625" },
    LeftShiftStep { extra_digits: 13, threshold: b"1136868377216160297393798828125" },
    LeftShiftStep { extra_digits: 14, threshold: b"5684341886080801486968994140625" },
    LeftShiftStep { extra_digits: 14, threshold: b"28421709430404007434844970703125" },
    LeftShiftStep { extra_digits: 14, threshold: b"142108547152020037174224853515625" },
    LeftShiftStep { extra_digits: 15, threshold: b"710542735760100185871124267578125" },
    LeftShiftStep { extra_digits: 15, threshold: b"3552713678800500929355621337890625" },
    LeftShiftStep { extra_digits: 15, threshold: b"17763568394002504646778106689453125" },
    LeftShiftStep { extra_digits: 16, threshold: b"88817841970012523233890533447265625" },
    LeftShiftStep { extra_digits: 16, threshold: b"444089209850062616169452667236328125" },
    LeftShiftStep { extra_digits: 16, threshold: b"2220446049250313080847263336181640625" },
    LeftShiftStep { extra_digits: 16, threshold: b"11102230246251565404236316680908203125" },
    LeftShiftStep { extra_digits: 17, threshold: b"55511151231257827021181583404541015625" },
    LeftShiftStep { extra_digits: 17, threshold: b"277555756156289135105907917022705078125" },
    LeftShiftStep { extra_digits: 17, threshold: b"1387778780781445675529539585113525390625" },
    LeftShiftStep { extra_digits: 18, threshold: b"6938893903907228377647697925567626953125" },
    LeftShiftStep { extra_digits: 18, threshold: b"34694469519536141888238489627838134765625" },
    LeftShiftStep { extra_digits: 18, threshold: b"173472347597680709441192448139190673828125" },
    LeftShiftStep { extra_digits: 19, threshold: b"867361737988403547205962240695953369140625" },
];

/// Fixed-capacity decimal digit sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: ArrayVec<u8, DIGIT_CAPACITY>,
    decimal_point: i32,
    negative: bool,
    truncated: bool,
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitBuffer {
    /// Create an empty buffer (the value zero).
    pub fn new() -> Self {
        Self {
            digits: ArrayVec::new(),
            decimal_point: 0,
            negative: false,
            truncated: false,
        }
    }

    /// Create a buffer holding `value`.
    pub fn from_u64(value: u64) -> Self {
        let mut buffer = Self::new();
        buffer.assign(value);
        buffer
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Significant digits as ASCII, most significant first.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Number of significant digits in use.
    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True when the buffer represents zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Position of the decimal point relative to the first digit.
    #[inline]
    pub fn decimal_point(&self) -> i32 {
        self.decimal_point
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
    }

    /// True once a shift has discarded a nonzero digit past the capacity.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Digit at `index`, or `'0'` past the end.
    #[inline]
    pub(crate) fn digit_or_zero(&self, index: usize) -> u8 {
        self.digits.get(index).copied().unwrap_or(b'0')
    }

    /// Decimal exponent of the last significant digit.
    #[inline]
    pub(crate) fn exponent(&self) -> i32 {
        self.decimal_point - self.digits.len() as i32
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Replace the contents with the decimal digits of `value`.
    pub fn assign(&mut self, mut value: u64) {
        let mut reversed: ArrayVec<u8, 20> = ArrayVec::new();
        while value > 0 {
            let quo = value / 10;
            reversed.push((value - 10 * quo) as u8 + b'0');
            value = quo;
        }

        self.digits.clear();
        self.digits.extend(reversed.into_iter().rev());
        self.decimal_point = self.digits.len() as i32;
        self.trim();
    }

    fn trim(&mut self) {
        while self.digits.last() == Some(&b'0') {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.decimal_point = 0;
        }
    }

    // ========================================================================
    // Binary Shifts
    // ========================================================================

    /// Multiply (`shift > 0`) or divide (`shift < 0`) the value by 2^|shift|.
    pub fn shift(&mut self, shift: i32) {
        if self.digits.is_empty() {
            return;
        }
        let mut remaining = shift.unsigned_abs();
        if shift > 0 {
            while remaining > MAX_SHIFT {
                self.shift_left(MAX_SHIFT);
                remaining -= MAX_SHIFT;
            }
            self.shift_left(remaining);
        } else if shift < 0 {
            while remaining > MAX_SHIFT {
                self.shift_right(MAX_SHIFT);
                remaining -= MAX_SHIFT;
            }
            self.shift_right(remaining);
        }
    }

    /// Divide by 2^k, k <= MAX_SHIFT.
    fn shift_right(&mut self, k: u32) {
        let len = self.digits.len();
        let mut read = 0usize;
        let mut write = 0usize;

        // Pick up enough leading digits to cover the first division.
        let mut acc: u64 = 0;
        while acc >> k == 0 {
            if read >= len {
                if acc == 0 {
                    self.digits.clear();
                    self.decimal_point = 0;
                    return;
                }
                while acc >> k == 0 {
                    acc *= 10;
                    read += 1;
                }
                break;
            }
            acc = acc * 10 + u64::from(self.digits[read] - b'0');
            read += 1;
        }
        self.decimal_point -= read as i32 - 1;

        let mask = (1u64 << k) - 1;

        // Pick up a digit, put down a digit.
        while read < len {
            let next = u64::from(self.digits[read] - b'0');
            let digit = acc >> k;
            acc &= mask;
            self.digits[write] = digit as u8 + b'0';
            write += 1;
            acc = acc * 10 + next;
            read += 1;
        }

        // Drain the accumulator.
        while acc > 0 {
            let digit = acc >> k;
            acc &= mask;
            if write < self.digits.len() {
                self.digits[write] = digit as u8 + b'0';
                write += 1;
            } else if self.digits.try_push(digit as u8 + b'0').is_ok() {
                write += 1;
            } else if digit > 0 {
                self.truncated = true;
            }
            acc *= 10;
        }

        self.digits.truncate(write);
        self.trim();
    }

    /// Multiply by 2^k, k <= MAX_SHIFT.
    fn shift_left(&mut self, k: u32) {
        let step = &LEFT_SHIFT_TABLE[k as usize];
        let mut delta = step.extra_digits;
        if prefix_is_less_than(&self.digits, step.threshold) {
            delta -= 1;
        }

        let len = self.digits.len();
        let grown = (len + delta).min(DIGIT_CAPACITY);
        while self.digits.len() < grown {
            self.digits.push(b'0');
        }

        let mut read = len;
        let mut write = len + delta;
        let mut acc: u64 = 0;

        while read > 0 {
            read -= 1;
            acc += u64::from(self.digits[read] - b'0') << k;
            let quo = acc / 10;
            let rem = acc - 10 * quo;
            write -= 1;
            self.put_digit(write, rem);
            acc = quo;
        }

        while acc > 0 {
            let quo = acc / 10;
            let rem = acc - 10 * quo;
            write -= 1;
            self.put_digit(write, rem);
            acc = quo;
        }

        self.decimal_point += delta as i32;
        self.trim();
    }

    #[inline]
    fn put_digit(&mut self, index: usize, digit: u64) {
        if index < self.digits.len() {
            self.digits[index] = digit as u8 + b'0';
        } else if digit != 0 {
            self.truncated = true;
        }
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Whether cutting at `n` digits should round up.
    ///
    /// An exact half rounds to even, unless an earlier shift truncated
    /// nonzero digits, in which case the true value is above the half.
    fn should_round_up(&self, n: usize) -> bool {
        if n >= self.digits.len() {
            return false;
        }
        if self.digits[n] == b'5' && n + 1 == self.digits.len() {
            if self.truncated {
                return true;
            }
            return n > 0 && (self.digits[n - 1] - b'0') % 2 != 0;
        }
        self.digits[n] >= b'5'
    }

    /// Round to `n` digits, half to even.
    ///
    /// `n == 0` rounds just left of the first digit, as in 0.09 -> 0.1.
    pub fn round(&mut self, n: usize) {
        if n >= self.digits.len() {
            return;
        }
        if self.should_round_up(n) {
            self.round_up(n);
        } else {
            self.round_down(n);
        }
    }

    /// Truncate to `n` digits.
    pub fn round_down(&mut self, n: usize) {
        if n >= self.digits.len() {
            return;
        }
        self.digits.truncate(n);
        self.trim();
    }

    /// Round away from zero at `n` digits.
    pub fn round_up(&mut self, n: usize) {
        if n >= self.digits.len() {
            return;
        }

        for i in (0..n).rev() {
            if self.digits[i] < b'9' {
                self.digits[i] += 1;
                self.digits.truncate(i + 1);
                return;
            }
        }

        // All nines: carry out into a single 1.
        self.digits[0] = b'1';
        self.digits.truncate(1);
        self.decimal_point += 1;
    }
}

/// Is the leading prefix of `digits` lexicographically less than `threshold`?
fn prefix_is_less_than(digits: &[u8], threshold: &[u8]) -> bool {
    for (i, &t) in threshold.iter().enumerate() {
        match digits.get(i) {
            None => return true,
            Some(&d) if d != t => return d < t,
            Some(_) => {},
        }
    }
    false
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }

        let digits = std::str::from_utf8(&self.digits).map_err(|_| fmt::Error)?;
        let len = self.digits.len() as i64;
        let point = i64::from(self.decimal_point);

        if point <= 0 {
            write!(f, "0.{}{}", "0".repeat((-point) as usize), digits)
        } else if point < len {
            let (int_part, frac_part) = digits.split_at(point as usize);
            write!(f, "{}.{}", int_part, frac_part)
        } else {
            write!(f, "{}{}", digits, "0".repeat((point - len) as usize))
        }
    }
}

impl fmt::Debug for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DigitBuffer({}, used={}, point={}, truncated={})",
            self, self.digits.len(), self.decimal_point, self.truncated
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
