use compare::{natural, Natural};
use quickcheck::{Arbitrary, Gen, TestResult, quickcheck};
use super::{Iter, Link, Node, Path};
use super::super::balance::{self, Balance, Unbalanced, Weight};

/// An operation on a tree of `u16`s.
#[derive(Clone, Debug)]
enum Op {
    /// Insert an item into the tree.
    Insert(u16),
    /// Remove the item at index `n % len` from the tree.
    Remove(usize),
    /// Remove an item that may or may not be present.
    RemoveAny(u16),
}

impl Arbitrary for Op {
    fn arbitrary(gen: &mut Gen) -> Op {
        match u8::arbitrary(gen) % 3 {
            0 => Op::Remove(usize::arbitrary(gen)),
            1 => Op::RemoveAny(u16::arbitrary(gen)),
            _ => Op::Insert(u16::arbitrary(gen)),
        }
    }
}

struct Fixture<B> where B: Balance {
    root: Link<u16>,
    path: Path<u16>,
    len: usize,
    cmp: Natural<u16>,
    policy: ::std::marker::PhantomData<B>,
}

impl<B> Fixture<B> where B: Balance {
    fn new() -> Self {
        Fixture { root: None, path: Path::new(), len: 0, cmp: natural(), policy: ::std::marker::PhantomData }
    }

    fn with_items(items: &[u16]) -> Self {
        let mut f = Fixture::new();
        for &item in items { f.insert(item); }
        f
    }

    fn insert(&mut self, item: u16) -> bool {
        let inserted = super::insert::<_, _, B>(&mut self.root, &mut self.path, &self.cmp, item);
        if inserted { self.len += 1; }
        inserted
    }

    fn remove(&mut self, item: u16) -> Option<u16> {
        let removed = super::remove::<_, _, _, B>(&mut self.root, &mut self.path, &self.cmp, &item);
        if removed.is_some() { self.len -= 1; }
        removed
    }

    fn exec(&mut self, op: Op) {
        match op {
            Op::Insert(item) => { self.insert(item); }
            Op::Remove(index) => if self.len > 0 {
                let item = *self.items().nth(index % self.len).unwrap();
                assert_eq!(self.remove(item), Some(item));
            },
            Op::RemoveAny(item) => { self.remove(item); }
        }
    }

    fn items(&self) -> Iter<u16> { Iter::new(&self.root, self.len) }

    fn consistent(&self) -> bool {
        self.path.is_empty() &&
        super::validate(&self.root, self.len) &&
        super::validate_sorted(&self.root, &self.cmp)
    }
}

fn root(link: &Link<u16>) -> &Node<u16> { link.as_deref().unwrap() }

#[test]
fn weight_policy_stays_balanced_after_every_op() {
    fn check(ops: Vec<Op>) -> TestResult {
        let mut f = Fixture::<Weight>::new();

        for op in ops {
            f.exec(op);
            if !f.consistent() || !super::is_balanced(&f.root) { return TestResult::failed(); }
        }

        TestResult::passed()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn unbalanced_policy_keeps_counts_after_every_op() {
    fn check(ops: Vec<Op>) -> bool {
        let mut f = Fixture::<Unbalanced>::new();

        ops.into_iter().all(|op| {
            f.exec(op);
            f.consistent()
        })
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn sorted_insertion_degenerates_without_rebalancing() {
    let items: Vec<u16> = (0..200).collect();
    let f = Fixture::<Unbalanced>::with_items(&items);

    assert_eq!(super::height(&f.root), 200);
    assert!(!super::is_balanced(&f.root));
    assert!(f.consistent());
}

#[test]
fn sorted_insertion_stays_logarithmic_with_weight_policy() {
    let items: Vec<u16> = (0..1000).collect();
    let f = Fixture::<Weight>::with_items(&items);

    // A child holds at most three quarters of its parent's descendants.
    let bound = 1.0 + (f.len as f64).ln() / (4.0f64 / 3.0).ln();
    assert!((super::height(&f.root) as f64) <= bound);
    assert!(super::is_balanced(&f.root));
    assert!(f.consistent());

    let rev: Vec<u16> = (0..1000).rev().collect();
    let f = Fixture::<Weight>::with_items(&rev);
    assert!((super::height(&f.root) as f64) <= bound);
    assert!(f.consistent());
}

#[test]
fn rotations_preserve_order_and_counts() {
    use self::balance::Node as _;

    let mut f = Fixture::<Unbalanced>::with_items(&[4, 2, 6, 1, 3, 5, 7]);

    f.root.as_mut().unwrap().rotate_left();
    assert_eq!(root(&f.root).item, 6);
    assert_eq!(root(&f.root).descendants, 6);
    assert_eq!(root(&f.root).left.as_ref().unwrap().descendants, 4);
    assert!(f.consistent());
    assert_eq!(f.items().cloned().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);

    f.root.as_mut().unwrap().rotate_right();
    f.root.as_mut().unwrap().rotate_right();
    assert_eq!(root(&f.root).item, 2);
    assert_eq!(root(&f.root).right.as_ref().unwrap().descendants, 4);
    assert!(f.consistent());
    assert_eq!(f.items().cloned().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn rotation_without_child_is_a_no_op() {
    use self::balance::Node as _;

    let mut f = Fixture::<Unbalanced>::with_items(&[1, 2]);
    f.root.as_mut().unwrap().rotate_right();
    assert_eq!(root(&f.root).item, 1);
    assert!(f.consistent());
}

#[test]
fn removing_two_child_node_splices_deep_successor() {
    // 10 has two children; its successor 12 sits at the end of a left chain in 20's subtree
    // and has a right child of its own.
    let mut f = Fixture::<Unbalanced>::with_items(&[10, 5, 20, 15, 25, 12, 13]);

    assert_eq!(f.remove(10), Some(10));
    assert_eq!(root(&f.root).item, 12);
    assert_eq!(root(&f.root).descendants, 5);
    assert!(f.consistent());
    assert_eq!(f.items().cloned().collect::<Vec<_>>(), [5, 12, 13, 15, 20, 25]);

    // 15 lost 12 and gained 13 in its place.
    let right = root(&f.root).right.as_ref().unwrap();
    let fifteen = right.left.as_ref().unwrap();
    assert_eq!(fifteen.item, 15);
    assert_eq!(fifteen.left.as_ref().unwrap().item, 13);
    assert_eq!(fifteen.descendants, 1);
}

#[test]
fn removing_missing_item_leaves_path_empty() {
    let mut f = Fixture::<Weight>::with_items(&[2, 1, 3]);
    assert_eq!(f.remove(4), None);
    assert!(!f.insert(2));
    assert!(f.consistent());
    assert_eq!(f.len, 3);
}

#[test]
fn nearest_agrees_with_scan() {
    fn check(items: Vec<u16>, query: u16) -> TestResult {
        let f = Fixture::<Weight>::with_items(&items);
        let found = super::nearest(&f.root, &f.cmp, &query, |a: &u16, b: &u16| a.abs_diff(*b));

        match f.items().map(|item| item.abs_diff(query)).min() {
            None => TestResult::from_bool(found.is_none()),
            Some(best) => TestResult::from_bool(found.map(|item| item.abs_diff(query)) == Some(best)),
        }
    }

    quickcheck(check as fn(Vec<u16>, u16) -> TestResult);
}

#[test]
fn nearest_prefers_deeper_node_on_tie() {
    // 20 is the root, 10 its left child; 15 is equally far from both.
    let f = Fixture::<Unbalanced>::with_items(&[20, 10]);
    let found = super::nearest(&f.root, &f.cmp, &15, |a: &u16, b: &u16| a.abs_diff(*b));
    assert_eq!(found, Some(&10));
}

#[test]
fn validate_detects_stale_count() {
    let mut f = Fixture::<Unbalanced>::with_items(&[2, 1, 3]);
    assert!(super::validate(&f.root, f.len));
    assert!(!super::validate(&f.root, f.len + 1));

    f.root.as_mut().unwrap().left.as_mut().unwrap().descendants = 1;
    assert!(!super::validate(&f.root, f.len));
    assert!(super::validate_sorted(&f.root, &f.cmp));
}

#[test]
fn validate_sorted_detects_misplaced_grandchild() {
    let mut f = Fixture::<Unbalanced>::with_items(&[10, 5, 7]);
    assert!(super::validate_sorted(&f.root, &f.cmp));

    // 7 is greater than its parent 5 but also belongs left of the root 10; 12 does not.
    f.root.as_mut().unwrap().left.as_mut().unwrap().right.as_mut().unwrap().item = 12;
    assert!(!super::validate_sorted(&f.root, &f.cmp));
    assert!(super::validate(&f.root, f.len));
}

#[test]
fn structure_shows_cached_counts() {
    let f = Fixture::<Unbalanced>::with_items(&[2, 1, 3, 4]);
    assert_eq!(super::Structure::new(&f.root).to_string(),
               "([3] 2 left=([0] 1) right=([1] 3 right=([0] 4)))");
    assert_eq!(super::Structure::new(&None::<Box<Node<u16>>>).to_string(), "()");
}

#[test]
fn policies_report_sides() {
    assert_eq!(balance::Side::Left.opposite(), balance::Side::Right);
    assert_eq!(balance::Side::Right.opposite(), balance::Side::Left);
    assert!(Weight::is_balanced(1, 0));
    assert!(Weight::is_balanced(3, 1));
    assert!(!Weight::is_balanced(4, 1));
}
