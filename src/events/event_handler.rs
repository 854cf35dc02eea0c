/// Something that reacts to a stream of `T`, e.g. commands arriving from a channel.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
