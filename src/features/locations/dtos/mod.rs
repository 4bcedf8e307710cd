mod location_dto;

pub use location_dto::{
    CreateLocationDto, DistanceResponseDto, LocationResponseDto, MarkerDto, UpdateLocationDto,
    VisitResponseDto,
};
