//! Pick the best compute backend allowed by enabled crate features, expose it
//! as a Relaxation typedef.

cfg_if::cfg_if! {
    if #[cfg(feature = "compute_parallel")] {
        pub type Relaxation = compute_parallel::Relaxation;
    } else {
        pub type Relaxation = compute_naive::Relaxation;
    }
}
