pub mod activities_service;
