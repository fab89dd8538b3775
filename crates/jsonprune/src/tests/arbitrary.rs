use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{Map, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Value {
            match usize::arbitrary(g) % 5 {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => Value::Integer(i64::arbitrary(g)),
                3 => Value::Double(JsonNumber::arbitrary(g).0),
                _ => Value::String(String::arbitrary(g)),
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 4 {
                0 | 1 => scalar(g),
                2 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect::<Vec<_>>())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        match self {
            Value::Array(items) => alloc::boxed::Box::new(items.shrink().map(Value::Array)),
            Value::String(s) => alloc::boxed::Box::new(s.shrink().map(Value::String)),
            _ => quickcheck::empty_shrinker(),
        }
    }
}
