// Generated proto modules will be included here after build
// Run `cargo build` to generate the proto code

pub mod common {
    include!("market.common.rs");
}

pub mod listings {
    include!("market.listings.rs");
}

pub mod moderation {
    include!("market.moderation.rs");
}

pub mod catalog {
    include!("market.catalog.rs");
}

pub mod cart {
    include!("market.cart.rs");
}

pub mod wishlist {
    include!("market.wishlist.rs");
}

pub mod profile {
    include!("market.profile.rs");
}

pub mod health {
    include!("grpc.health.v1.rs");
}
