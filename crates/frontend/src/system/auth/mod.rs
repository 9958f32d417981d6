//! Session credentials. Sign-in and token refresh live outside the portals;
//! they only read what the login flow left in `localStorage`.

pub mod storage;
