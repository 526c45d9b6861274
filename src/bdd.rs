use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use log::{debug, trace};

use crate::cache::{Cache, OpKey};
use crate::node::Node;
use crate::reference::Ref;
use crate::table::Table;

type Storage = Table<Node>;

/// Sizing of the node storage and the computed table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BddConfig {
    /// The node storage holds at most `2^storage_bits` nodes.
    pub storage_bits: usize,
    /// The computed table is pre-sized for `2^cache_bits` entries.
    pub cache_bits: usize,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 20,
            cache_bits: 16,
        }
    }
}

impl BddConfig {
    pub fn with_storage_bits(mut self, storage_bits: usize) -> Self {
        self.storage_bits = storage_bits;
        self
    }

    pub fn with_cache_bits(mut self, cache_bits: usize) -> Self {
        self.cache_bits = cache_bits;
        self
    }
}

/// BDD manager.
///
/// Owns every node and memoizes operations. Nodes are hash-consed and high
/// edges are never complemented, so two [`Ref`]s are equal exactly when they
/// denote the same boolean function.
pub struct Bdd {
    storage: RefCell<Storage>,
    cache: RefCell<Cache<OpKey, Ref>>,
    pub zero: Ref,
    pub one: Ref,
}

impl Bdd {
    pub fn new(config: BddConfig) -> Self {
        assert!(
            config.storage_bits <= 31,
            "Storage bits should be in the range 0..=31"
        );

        let mut storage = Storage::new(config.storage_bits);

        // Allocate the terminal node:
        let one = storage.add(Node::default());
        assert_eq!(one, 1); // Make sure the terminal node is (1).
        let one = Ref::positive(one as u32);
        let zero = -one;

        debug!("Created BDD manager with {:?}", config);

        Self {
            storage: RefCell::new(storage),
            cache: RefCell::new(Cache::new(config.cache_bits)),
            zero,
            one,
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new(BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("capacity", &storage.capacity())
            .field("size", &storage.size())
            .finish()
    }
}

impl Bdd {
    pub fn cache(&self) -> std::cell::Ref<'_, Cache<OpKey, Ref>> {
        self.cache.borrow()
    }

    /// Number of allocated nodes, including the terminal.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().size()
    }

    pub fn variable(&self, index: u32) -> u32 {
        self.storage.borrow().value(index as usize).variable
    }
    pub fn low(&self, index: u32) -> Ref {
        self.storage.borrow().value(index as usize).low
    }
    pub fn high(&self, index: u32) -> Ref {
        self.storage.borrow().value(index as usize).high
    }

    pub fn low_node(&self, node: Ref) -> Ref {
        let low = self.low(node.index());
        if node.is_negated() {
            -low
        } else {
            low
        }
    }
    pub fn high_node(&self, node: Ref) -> Ref {
        let high = self.high(node.index());
        if node.is_negated() {
            -high
        } else {
            high
        }
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        node.index() == self.one.index()
    }

    pub fn mk_node(&self, v: u32, low: Ref, high: Ref) -> Ref {
        trace!("mk(v = {}, low = {}, high = {})", v, low, high);

        assert_ne!(v, 0, "Variable index should not be zero");

        if low == high {
            return low;
        }

        // Keep high edges regular
        if high.is_negated() {
            return -self.mk_node(v, -low, -high);
        }

        let i = self.storage.borrow_mut().put(Node {
            variable: v,
            low,
            high,
        });
        Ref::positive(i as u32)
    }

    pub fn mk_var(&self, v: u32) -> Ref {
        assert_ne!(v, 0, "Variable index should not be zero");
        self.mk_node(v, self.zero, self.one)
    }

    /// Conjunction of signed literals (`-v` is the negation of variable `v`).
    pub fn cube(&self, literals: impl IntoIterator<Item = i32>) -> Ref {
        let mut literals = literals.into_iter().collect::<Vec<_>>();
        literals.sort_by_key(|&v| std::cmp::Reverse(v.unsigned_abs()));
        debug!("cube(literals = {:?})", literals);
        let mut current = self.one;
        for lit in literals {
            assert_ne!(lit, 0, "Variable index should not be zero");
            let v = lit.unsigned_abs();
            current = if lit < 0 {
                self.mk_node(v, current, self.zero)
            } else {
                self.mk_node(v, self.zero, current)
            };
        }
        current
    }

    /// Cofactors of `node` with respect to `v`, which must not be below the top variable.
    pub fn top_cofactors(&self, node: Ref, v: u32) -> (Ref, Ref) {
        assert_ne!(v, 0, "Variable index should not be zero");

        if self.is_terminal(node) || v < self.variable(node.index()) {
            return (node, node);
        }
        assert_eq!(v, self.variable(node.index()));
        (self.low_node(node), self.high_node(node))
    }

    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(f, g, h) = (f ∧ g) ∨ (¬f ∧ h)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use bdd_closure::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let x = bdd.mk_var(1);
    /// let y = bdd.mk_var(2);
    /// let z = bdd.mk_var(3);
    /// let f = bdd.apply_ite(x, y, z);
    /// let x_and_y = bdd.apply_and(x, y);
    /// let not_x_and_z = bdd.apply_and(-x, z);
    /// assert_eq!(f, bdd.apply_or(x_and_y, not_x_and_z));
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        trace!("apply_ite(f = {}, g = {}, h = {})", f, g, h);

        // Base cases:
        //   ite(1,G,H) => G
        //   ite(0,G,H) => H
        if self.is_one(f) {
            return g;
        }
        if self.is_zero(f) {
            return h;
        }

        //   ite(F,G,G) => G
        //   ite(F,1,0) => F
        //   ite(F,0,1) => ~F
        if g == h {
            return g;
        }
        if self.is_one(g) && self.is_zero(h) {
            return f;
        }
        if self.is_zero(g) && self.is_one(h) {
            return -f;
        }

        // Standard triples:
        //   ite(F,F,H) => ite(F,1,H)
        //   ite(F,G,F) => ite(F,G,0)
        //   ite(F,~F,H) => ite(F,0,H)
        //   ite(F,G,~F) => ite(F,G,1)
        if g == f {
            return self.apply_ite(f, self.one, h);
        }
        if h == f {
            return self.apply_ite(f, g, self.zero);
        }
        if g == -f {
            return self.apply_ite(f, self.zero, h);
        }
        if h == -f {
            return self.apply_ite(f, g, self.one);
        }

        // ite(~F,G,H) => ite(F,H,G)
        let (f, g, h) = if f.is_negated() { (-f, h, g) } else { (f, g, h) };

        // ite(F,~G,H) => ~ite(F,G,~H)
        let (g, h, negate) = if g.is_negated() {
            (-g, -h, true)
        } else {
            (g, h, false)
        };

        let key = OpKey::Ite(f, g, h);
        let cached = self.cache.borrow_mut().get(&key);
        let res = match cached {
            Some(res) => res,
            None => {
                // Top variable (f is known not to be a constant here)
                let mut m = self.variable(f.index());
                for r in [g, h] {
                    if !self.is_terminal(r) {
                        m = m.min(self.variable(r.index()));
                    }
                }

                let (f0, f1) = self.top_cofactors(f, m);
                let (g0, g1) = self.top_cofactors(g, m);
                let (h0, h1) = self.top_cofactors(h, m);

                let e = self.apply_ite(f0, g0, h0);
                let t = self.apply_ite(f1, g1, h1);

                let res = self.mk_node(m, e, t);
                self.cache.borrow_mut().insert(key, res);
                res
            }
        };

        if negate {
            -res
        } else {
            res
        }
    }

    pub fn apply_not(&self, f: Ref) -> Ref {
        -f
    }

    pub fn apply_and(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, v, self.zero)
    }

    pub fn apply_or(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, self.one, v)
    }

    pub fn apply_xor(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, -v, v)
    }

    pub fn apply_eq(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, v, -v)
    }

    pub fn apply_imply(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, v, self.one)
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        nodes
            .into_iter()
            .fold(self.one, |acc, node| self.apply_and(acc, node))
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        nodes
            .into_iter()
            .fold(self.zero, |acc, node| self.apply_or(acc, node))
    }

    /// Semantic equivalence of two functions.
    ///
    /// Nodes are hash-consed and kept in canonical form, so this is a handle comparison.
    pub fn is_equivalent(&self, f: Ref, g: Ref) -> bool {
        f == g
    }

    // f|v<-b
    pub fn substitute(&self, f: Ref, v: u32, b: bool) -> Ref {
        self.restrict_multi(f, &HashMap::from([(v, b)]))
    }

    /// Fix every variable in `values` to the given constant.
    pub fn restrict_multi(&self, f: Ref, values: &HashMap<u32, bool>) -> Ref {
        debug!("restrict_multi(f = {}, values = {:?})", f, values);
        let mut cache = HashMap::new();
        self.restrict_multi_(f, values, &mut cache)
    }

    fn restrict_multi_(
        &self,
        f: Ref,
        values: &HashMap<u32, bool>,
        cache: &mut HashMap<Ref, Ref>,
    ) -> Ref {
        if self.is_terminal(f) || values.is_empty() {
            return f;
        }

        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let i = self.variable(f.index());
        let res = match values.get(&i).copied() {
            Some(true) => self.restrict_multi_(self.high_node(f), values, cache),
            Some(false) => self.restrict_multi_(self.low_node(f), values, cache),
            None => {
                let low = self.restrict_multi_(self.low_node(f), values, cache);
                let high = self.restrict_multi_(self.high_node(f), values, cache);
                self.mk_node(i, low, high)
            }
        };
        cache.insert(f, res);
        res
    }

    // f|v<-g
    pub fn compose(&self, f: Ref, v: u32, g: Ref) -> Ref {
        debug!("compose(f = {}, v = {}, g = {})", f, v, g);
        assert_ne!(v, 0, "Variable index should not be zero");
        let mut cache = HashMap::new();
        self.compose_(f, v, g, &mut cache)
    }

    fn compose_(&self, f: Ref, v: u32, g: Ref, cache: &mut HashMap<(Ref, Ref), Ref>) -> Ref {
        if self.is_terminal(f) {
            return f;
        }

        let i = self.variable(f.index());
        if v < i {
            // 'f' does not depend on 'v'
            return f;
        }

        let key = (f, g);
        if let Some(&res) = cache.get(&key) {
            return res;
        }

        let res = if v == i {
            self.apply_ite(g, self.high_node(f), self.low_node(f))
        } else {
            let m = if self.is_terminal(g) {
                i
            } else {
                i.min(self.variable(g.index()))
            };

            let (f0, f1) = self.top_cofactors(f, m);
            let (g0, g1) = self.top_cofactors(g, m);
            let h0 = self.compose_(f0, v, g0, cache);
            let h1 = self.compose_(f1, v, g1, cache);

            self.mk_node(m, h0, h1)
        };
        cache.insert(key, res);
        res
    }

    /// Rename variables pairwise, `from -> to`.
    ///
    /// Substitutions are applied one after another, so no target variable may
    /// occur in `f` or among the remaining sources.
    pub fn rename(&self, f: Ref, pairs: &[(u32, u32)]) -> Ref {
        debug!("rename(f = {}, pairs = {:?})", f, pairs);
        pairs.iter().fold(f, |acc, &(from, to)| {
            if from == to {
                acc
            } else {
                self.compose(acc, from, self.mk_var(to))
            }
        })
    }

    /// Existential quantification (smoothing) over `vars`.
    ///
    /// ```text
    /// ∃v. f = f|v<-0 ∨ f|v<-1
    /// ```
    pub fn exists(&self, f: Ref, vars: &[u32]) -> Ref {
        debug!("exists(f = {}, vars = {:?})", f, vars);
        let vars: BTreeSet<u32> = vars.iter().copied().collect();
        let mut cache = HashMap::new();
        self.exists_(f, &vars, &mut cache)
    }

    fn exists_(&self, f: Ref, vars: &BTreeSet<u32>, cache: &mut HashMap<Ref, Ref>) -> Ref {
        if self.is_terminal(f) {
            return f;
        }

        let i = self.variable(f.index());
        match vars.last() {
            Some(&last) if i <= last => {}
            _ => return f,
        }

        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let low = self.exists_(self.low_node(f), vars, cache);
        let high = self.exists_(self.high_node(f), vars, cache);
        let res = if vars.contains(&i) {
            self.apply_or(low, high)
        } else {
            self.mk_node(i, low, high)
        };
        cache.insert(f, res);
        res
    }

    /// Universal quantification over `vars`.
    pub fn forall(&self, f: Ref, vars: &[u32]) -> Ref {
        -self.exists(-f, vars)
    }

    /// Indices of all nodes reachable from `nodes`, including the terminal.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = Ref>) -> HashSet<u32> {
        let mut visited = HashSet::new();
        visited.insert(self.one.index());
        let mut queue = VecDeque::from_iter(nodes);

        while let Some(node) = queue.pop_front() {
            let i = node.index();
            if visited.insert(i) {
                queue.push_back(self.low(i));
                queue.push_back(self.high(i));
            }
        }

        visited
    }

    /// Variables `f` depends on.
    pub fn support(&self, f: Ref) -> BTreeSet<u32> {
        self.descendants([f])
            .into_iter()
            .filter(|&i| i != self.one.index())
            .map(|i| self.variable(i))
            .collect()
    }

    pub fn size(&self, f: Ref) -> u64 {
        self.descendants([f]).len() as u64
    }

    pub fn to_bracket_string(&self, node: Ref) -> String {
        if self.is_zero(node) {
            return "(0)".to_string();
        } else if self.is_one(node) {
            return "(1)".to_string();
        }

        let v = self.variable(node.index());
        let low = self.low_node(node);
        let high = self.high_node(node);

        format!(
            "{}:(x{}, {}, {})",
            node,
            v,
            self.to_bracket_string(high),
            self.to_bracket_string(low)
        )
    }
}
