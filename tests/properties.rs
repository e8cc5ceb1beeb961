use proptest::prelude::*;
use smallany::space::*;
use smallany::SmallAny;
use std::any::TypeId;
use std::fmt::Debug;

fn assert_holds<T, Space>(value: T)
where
    T: Clone + PartialEq + Debug + 'static,
    Space: 'static,
{
    let mut any = SmallAny::<Space>::empty();
    any.emplace(value.clone());
    assert!(any.has_value());
    assert_eq!(any.type_id(), Some(TypeId::of::<T>()));
    assert_eq!(any.cast::<T>(), Ok(value.clone()));

    let copy = any.clone();
    let moved = any.take();
    assert!(!any.has_value());
    assert_eq!(moved.into_value::<T>(), Ok(value.clone()));
    assert_eq!(copy.cast_ref::<T>(), Ok(&value));
}

proptest! {
    #[test]
    fn integers_round_trip(n in any::<i64>()) {
        assert_holds::<_, S1>(n);
        assert_holds::<_, S4>(n);
    }

    #[test]
    fn strings_round_trip(s in ".*") {
        assert_holds::<_, S1>(s.clone());
        assert_holds::<_, S4>(s);
    }

    #[test]
    fn vectors_round_trip(v in proptest::collection::vec(any::<u8>(), 0..64)) {
        assert_holds::<_, S2>(v);
    }

    #[test]
    fn arrays_round_trip(a in any::<[u64; 6]>()) {
        assert_holds::<_, S4>(a);
        assert_holds::<_, S8>(a);
    }

    #[test]
    fn swap_exchanges(a in any::<u32>(), b in ".{0,40}") {
        let mut left: SmallAny = SmallAny::new(a);
        let mut right: SmallAny = SmallAny::new(b.clone());
        left.swap(&mut right);
        prop_assert_eq!(left.cast::<String>(), Ok(b));
        prop_assert_eq!(right.cast::<u32>(), Ok(a));
    }

    #[test]
    fn mismatched_casts_fail(n in any::<i32>()) {
        let any: SmallAny = SmallAny::new(n);
        prop_assert!(any.downcast_ref::<i64>().is_none());
        prop_assert!(any.downcast_ref::<u32>().is_none());
        prop_assert!(any.cast::<i16>().is_err());
    }
}
