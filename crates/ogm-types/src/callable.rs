use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// An invocable unit held by reference.
///
/// A callable is not a constructor and has no own enumerable state; the
/// engines treat it as an opaque behavioral leaf. Cloning produces a
/// forwarding handle that invokes the same underlying unit with the same
/// arguments; closed-over state is shared, not copied.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn(&[Value]) -> Value>);

impl Callable {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the underlying unit.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// Stable address of the underlying allocation, used for identity checks.
    pub fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// A forwarding handle delegating to the same underlying unit.
    pub fn forwarding(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable(0x{:x})", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_forwards_arguments() {
        let double = Callable::new(|args| match args.first() {
            Some(Value::Int(i)) => Value::Int(i * 2),
            _ => Value::Null,
        });
        assert_eq!(double.call(&[Value::from(21)]), Value::from(42));
        assert_eq!(double.call(&[]), Value::Null);
    }

    #[test]
    fn forwarding_shares_the_unit() {
        let unit = Callable::new(|_| Value::from("ok"));
        let forwarded = unit.forwarding();
        assert_eq!(unit.address(), forwarded.address());
        assert_eq!(forwarded.call(&[]), Value::from("ok"));
    }
}
