// LTM endpoint groups
//
// Inherent `BigIpClient` methods, one file per resource collection.

pub mod node;
pub mod pool;
pub mod virtual_server;
