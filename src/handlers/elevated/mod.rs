// handlers/elevated/mod.rs - Administrative handlers (ADMIN credential required)
//
// Route prefix: /api/admin/*. Admin accounts are never self-registered; they
// are created with the `mentorbridge-admin` CLI.

pub mod admin;
