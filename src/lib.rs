//! Purpose: Accessor/allocator shim between a managed-language binding and a
//! libuv-style async I/O library whose struct layouts are not public contract.
//! Exports: `core` (allocation, descriptors, requests, errors) and `abi`
//! (the flat C surface bindings call).
//! Invariants: No struct offset is assumed anywhere; layout knowledge enters
//! only through the native API descriptor.
//! Invariants: Every operation is synchronous and stateless; allocation
//! ownership transfers wholly to the caller.
pub mod abi;
pub mod core;
