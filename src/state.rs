use crate::carousel::Bound;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InertReason {
    MissingContainer, // Container id did not resolve on the surface
    NoSlides,         // Container resolved but holds no slides
    Disposed,         // Torn down explicitly by its owner
}

#[derive(Debug)]
pub enum CarouselState {
    Active(Bound),       // Rotating: owns its elements, index and timer
    Inert(InertReason),  // Permanently idle, every operation is a no-op
}
