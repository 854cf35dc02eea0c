/// Implemented by types that hold channel subscriptions pointing back at
/// themselves. Those Rc cycles are not freed automatically and must be broken
/// with `destroy`.
pub trait Destroyable {
    fn destroy(&mut self);
}
