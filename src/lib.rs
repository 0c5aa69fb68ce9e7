pub mod configuration;
pub mod error;
pub mod locale;

pub mod cache {
    pub mod boundedcache;
    pub mod localecache;
}

pub mod time {
    pub mod utility;

    pub mod daterule {
        pub mod movablefeast;
        pub mod daterule;
        pub mod dateexpression;
    }

    pub mod calendar {
        pub mod holidayentry;
        pub mod holidaycalendar;
    }
}
