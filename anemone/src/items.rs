/*
 * anemone/src/items.rs
 *
 * Purpose: A small fluent builder for slot content. A base supplier produces
 * the stack; stack modifiers run next, in the order they were added, then
 * meta modifiers, each reading the stack's meta, changing it and writing it
 * back.
 */

/// Content types whose display metadata can be edited separately.
pub trait ItemMeta {
    type Meta;

    fn meta(&self) -> Self::Meta;

    fn set_meta(&mut self, meta: Self::Meta);
}

type StackModifier<T> = Box<dyn Fn(&mut T)>;
type MetaModifier<M> = Box<dyn Fn(&mut M)>;

pub struct Items<T: ItemMeta> {
    supplier: Box<dyn Fn() -> T>,
    stack_modifiers: Vec<StackModifier<T>>,
    meta_modifiers: Vec<MetaModifier<T::Meta>>,
}

impl<T: ItemMeta + 'static> Items<T> {
    /// Builds copies of `stack`.
    pub fn of(stack: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(move || stack.clone())
    }

    /// Builds from a fresh stack produced by `supplier` each time.
    pub fn from_fn(supplier: impl Fn() -> T + 'static) -> Self {
        Items {
            supplier: Box::new(supplier),
            stack_modifiers: Vec::new(),
            meta_modifiers: Vec::new(),
        }
    }

    pub fn modify_stack(mut self, modifier: impl Fn(&mut T) + 'static) -> Self {
        self.stack_modifiers.push(Box::new(modifier));
        self
    }

    pub fn modify_meta(mut self, modifier: impl Fn(&mut T::Meta) + 'static) -> Self {
        self.meta_modifiers.push(Box::new(modifier));
        self
    }

    pub fn build(&self) -> T {
        let mut stack = (self.supplier)();
        for modifier in &self.stack_modifiers {
            modifier(&mut stack);
        }
        for modifier in &self.meta_modifiers {
            let mut meta = stack.meta();
            modifier(&mut meta);
            stack.set_meta(meta);
        }
        stack
    }
}
