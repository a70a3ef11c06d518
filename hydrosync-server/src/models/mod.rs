mod device;

pub use device::{Device, DeviceRow, DeviceTable, ShallowDevice};

pub trait Table {
    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;
}
