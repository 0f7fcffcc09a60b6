use alloc::{string::String, vec::Vec};

pub trait ToCbor {
    fn to_cbor(&self, encoder: &mut Encoder);
}

pub struct Encoder {
    data: Vec<u8>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn emit_uint_minor(&mut self, major: u8, val: u64) {
        if val < 24 {
            self.data.push((major << 5) | (val as u8))
        } else if val <= u8::MAX as u64 {
            self.data.push((major << 5) | 24u8);
            self.data.push(val as u8)
        } else if val <= u16::MAX as u64 {
            self.data.push((major << 5) | 25u8);
            self.data.extend((val as u16).to_be_bytes())
        } else if val <= u32::MAX as u64 {
            self.data.push((major << 5) | 26u8);
            self.data.extend((val as u32).to_be_bytes())
        } else {
            self.data.push((major << 5) | 27u8);
            self.data.extend(val.to_be_bytes())
        }
    }

    /// Appends already-encoded CBOR verbatim.
    pub fn emit_raw_slice(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data)
    }

    pub fn emit<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        value.to_cbor(self)
    }

    pub fn emit_null(&mut self) {
        self.data.push((7 << 5) | 22)
    }

    pub fn emit_array<F>(&mut self, count: usize, f: F)
    where
        F: FnOnce(&mut Array),
    {
        let mut a = Array::new(self, count);
        f(&mut a);
        a.end()
    }

    pub fn emit_slice<T>(&mut self, values: &[T])
    where
        T: ToCbor,
    {
        self.emit_array(values.len(), |a| {
            for value in values {
                a.emit(value);
            }
        })
    }

    /// Emits a map of `count` pairs.  Callers are responsible for key order.
    pub fn emit_map<F>(&mut self, count: usize, f: F)
    where
        F: FnOnce(&mut Map),
    {
        let mut m = Map::new(self, count);
        f(&mut m);
        m.end()
    }
}

pub struct Sequence<'a, const D: usize> {
    encoder: &'a mut Encoder,
    count: usize,
    idx: usize,
}

pub type Array<'a> = Sequence<'a, 1>;
pub type Map<'a> = Sequence<'a, 2>;

impl<'a, const D: usize> Sequence<'a, D> {
    fn new(encoder: &'a mut Encoder, count: usize) -> Self {
        encoder.emit_uint_minor(if D == 1 { 4 } else { 5 }, count as u64);
        Self {
            encoder,
            count: count * D,
            idx: 0,
        }
    }

    fn next_field(&mut self) -> &mut Encoder {
        self.idx += 1;
        if self.idx > self.count {
            panic!("Too many items added to definite length sequence")
        }
        self.encoder
    }

    fn end(self) {
        if self.idx != self.count {
            panic!(
                "Definite length sequence is short of items: {}, expected {}",
                self.idx, self.count
            );
        }
    }

    pub fn emit_raw_slice(&mut self, data: &[u8]) {
        self.next_field().emit_raw_slice(data)
    }

    pub fn emit<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        self.next_field().emit(value)
    }
}

macro_rules! impl_uint_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, encoder: &mut Encoder) {
                    encoder.emit_uint_minor(0, *self as u64);
                }
            }
        )*
    };
}

impl_uint_to_cbor!(u8, u16, u32, u64, usize);

fn emit_i64(encoder: &mut Encoder, val: i64) {
    if val >= 0 {
        encoder.emit_uint_minor(0, val as u64);
    } else {
        // -1 - val, without overflowing on i64::MIN
        encoder.emit_uint_minor(1, !(val as u64));
    }
}

macro_rules! impl_int_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, encoder: &mut Encoder) {
                    emit_i64(encoder, *self as i64)
                }
            }
        )*
    };
}

impl_int_to_cbor!(i8, i16, i32, i64, isize);

/// Floats are always written at double precision, so a value decoded from
/// any width re-encodes to the same nine bytes.
impl ToCbor for f64 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.data.push((7 << 5) | 27);
        encoder.data.extend(self.to_be_bytes())
    }
}

impl ToCbor for bool {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.data.push((7 << 5) | if *self { 21 } else { 20 })
    }
}

impl ToCbor for str {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_uint_minor(3, self.len() as u64);
        encoder.data.extend_from_slice(self.as_bytes())
    }
}

impl ToCbor for String {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_str().to_cbor(encoder)
    }
}

impl ToCbor for [u8] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_uint_minor(2, self.len() as u64);
        encoder.data.extend_from_slice(self)
    }
}

impl ToCbor for Vec<u8> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<const N: usize> ToCbor for [u8; N] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<T> ToCbor for Option<T>
where
    T: ToCbor,
{
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Some(value) => encoder.emit(value),
            None => encoder.emit_null(),
        }
    }
}

impl<T> ToCbor for &T
where
    T: ToCbor + ?Sized,
{
    fn to_cbor(&self, encoder: &mut Encoder) {
        (**self).to_cbor(encoder)
    }
}

pub fn emit<T>(value: &T) -> Vec<u8>
where
    T: ToCbor + ?Sized,
{
    let mut e = Encoder::new();
    e.emit(value);
    e.build()
}

pub fn emit_array<F>(count: usize, f: F) -> Vec<u8>
where
    F: FnOnce(&mut Array),
{
    let mut e = Encoder::new();
    e.emit_array(count, f);
    e.build()
}
