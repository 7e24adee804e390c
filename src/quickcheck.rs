use ::quickcheck::{Arbitrary, Gen};
use compare::Compare;
use super::{Balance, Tree};

impl<T, C, B> Arbitrary for Tree<T, C, B>
    where T: Arbitrary, C: 'static + Clone + Compare<T> + Default, B: 'static + Balance {

    fn arbitrary(gen: &mut Gen) -> Self { Vec::<T>::arbitrary(gen).into_iter().collect() }

    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> {
        let vec: Vec<T> = self.iter().cloned().collect();
        Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
    }
}
